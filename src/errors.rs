use piggy_config::ConfigError;
use piggy_core::CoreError;
use thiserror::Error;

/// Error type surfaced by [`crate::Engine`] and the CLI.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
