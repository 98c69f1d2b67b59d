//! piggy-core
//!
//! Ledger, rollover, summary scheduling and savings services.
//! Depends on piggy-domain. No terminal I/O, no direct filesystem access.

pub mod error;
pub mod goal_service;
pub mod ledger_service;
pub mod rollover_service;
pub mod scheduler;
pub mod statistics_service;
pub mod storage;
pub mod time;
pub mod transfer_service;

pub use error::CoreError;
pub use goal_service::*;
pub use ledger_service::*;
pub use rollover_service::*;
pub use scheduler::*;
pub use statistics_service::*;
pub use storage::*;
pub use time::*;
pub use transfer_service::*;
