//! piggy-domain
//!
//! Pure domain models (budgets, expenses, summary records, savings goals and the
//! persisted documents that carry them). No I/O, no CLI, no storage.

pub mod budget;
pub mod common;
pub mod documents;
pub mod expense;
pub mod savings;
pub mod summary;

pub use budget::*;
pub use common::*;
pub use documents::*;
pub use expense::*;
pub use savings::*;
pub use summary::*;
