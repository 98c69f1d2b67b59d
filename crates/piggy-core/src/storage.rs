use piggy_domain::{FinanceDocument, PiggyBankDocument};

use crate::CoreError;

/// Abstraction over persistence backends for the two engine documents.
///
/// Loads return `Ok(None)` when nothing has been stored yet.
pub trait DocumentStorage: Send + Sync {
    fn load_finance(&self) -> Result<Option<FinanceDocument>, CoreError>;
    fn save_finance(&self, document: &FinanceDocument) -> Result<(), CoreError>;
    fn load_piggy_bank(&self) -> Result<Option<PiggyBankDocument>, CoreError>;
    fn save_piggy_bank(&self, document: &PiggyBankDocument) -> Result<(), CoreError>;
    /// Removes every stored document.
    fn clear(&self) -> Result<(), CoreError>;
}
