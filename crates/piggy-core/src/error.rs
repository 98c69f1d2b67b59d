use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("No active savings goal")]
    GoalNotFound,
    #[error("A savings goal is already active")]
    GoalAlreadyActive,
    #[error("Savings goal is not completed yet")]
    GoalNotCompleted,
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
}
