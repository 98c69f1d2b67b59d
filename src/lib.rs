#![doc(test(attr(deny(warnings))))]

//! Piggy Ledger tracks periodic spending budgets, rolls them over across
//! calendar days and moves each day's unspent budget into a savings goal.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod utils;

pub use clock::SystemClock;
pub use engine::{Engine, EngineSignal, GoalStatus, NotificationSink, StatusReport};
pub use errors::EngineError;

pub use piggy_config;
pub use piggy_core;
pub use piggy_domain;
pub use piggy_storage_json;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Piggy Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
