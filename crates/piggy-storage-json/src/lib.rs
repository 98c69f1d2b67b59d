use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use piggy_core::{storage::DocumentStorage, CoreError};
use piggy_domain::{FinanceDocument, PiggyBankDocument};
use serde::{de::DeserializeOwned, Serialize};

const FINANCE_FILE: &str = "finance.json";
const PIGGY_BANK_FILE: &str = "piggy_bank.json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for the finance and piggy-bank documents.
#[derive(Debug, Clone)]
pub struct JsonDocumentStorage {
    root: PathBuf,
}

impl JsonDocumentStorage {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn finance_path(&self) -> PathBuf {
        self.root.join(FINANCE_FILE)
    }

    pub fn piggy_bank_path(&self) -> PathBuf {
        self.root.join(PIGGY_BANK_FILE)
    }
}

impl DocumentStorage for JsonDocumentStorage {
    fn load_finance(&self) -> Result<Option<FinanceDocument>, CoreError> {
        let document: Option<FinanceDocument> = load_document_from_path(&self.finance_path())?;
        Ok(document.map(|mut document| {
            document.migrate_legacy();
            document
        }))
    }

    fn save_finance(&self, document: &FinanceDocument) -> Result<(), CoreError> {
        save_document_to_path(document, &self.finance_path())
    }

    fn load_piggy_bank(&self) -> Result<Option<PiggyBankDocument>, CoreError> {
        load_document_from_path(&self.piggy_bank_path())
    }

    fn save_piggy_bank(&self, document: &PiggyBankDocument) -> Result<(), CoreError> {
        save_document_to_path(document, &self.piggy_bank_path())
    }

    fn clear(&self) -> Result<(), CoreError> {
        for path in [self.finance_path(), self.piggy_bank_path()] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

/// Saves a document to an arbitrary path through a temporary file and rename.
pub fn save_document_to_path<T: Serialize>(document: &T, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data =
        serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a document from disk. A missing file yields `Ok(None)`.
pub fn load_document_from_path<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|err| CoreError::Serde(format!("{}: {}", path.display(), err)))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
