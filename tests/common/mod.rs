#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use piggy_ledger::piggy_core::{Clock, CoreError, DocumentStorage};
use piggy_ledger::piggy_domain::{FinanceDocument, PiggyBankDocument};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for a test.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Test clock whose time only moves when told to.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(now),
        })
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().expect("lock clock") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("lock clock")
    }
}

/// In-memory document store shared between engine sessions; loads and saves can be made to fail.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    finance: Arc<Mutex<Option<FinanceDocument>>>,
    piggy_bank: Arc<Mutex<Option<PiggyBankDocument>>>,
    fail_saves: Arc<AtomicBool>,
    fail_loads: Arc<AtomicBool>,
}

impl MemoryStorage {
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn stored_finance(&self) -> Option<FinanceDocument> {
        self.finance.lock().expect("lock").clone()
    }

    pub fn stored_piggy_bank(&self) -> Option<PiggyBankDocument> {
        self.piggy_bank.lock().expect("lock").clone()
    }

    fn check_save(&self) -> Result<(), CoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("disk full".into()));
        }
        Ok(())
    }

    fn check_load(&self) -> Result<(), CoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(CoreError::Serde("unexpected end of input".into()));
        }
        Ok(())
    }
}

impl DocumentStorage for MemoryStorage {
    fn load_finance(&self) -> Result<Option<FinanceDocument>, CoreError> {
        self.check_load()?;
        Ok(self.stored_finance())
    }

    fn save_finance(&self, document: &FinanceDocument) -> Result<(), CoreError> {
        self.check_save()?;
        *self.finance.lock().expect("lock") = Some(document.clone());
        Ok(())
    }

    fn load_piggy_bank(&self) -> Result<Option<PiggyBankDocument>, CoreError> {
        self.check_load()?;
        Ok(self.stored_piggy_bank())
    }

    fn save_piggy_bank(&self, document: &PiggyBankDocument) -> Result<(), CoreError> {
        self.check_save()?;
        *self.piggy_bank.lock().expect("lock") = Some(document.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.finance.lock().expect("lock") = None;
        *self.piggy_bank.lock().expect("lock") = None;
        Ok(())
    }
}
