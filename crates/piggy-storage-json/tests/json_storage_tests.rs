use chrono::NaiveDate;
use piggy_core::{storage::DocumentStorage, CoreError, GoalService, LedgerService};
use piggy_domain::{ExpenseCategory, FinanceDocument, Period, PiggyBankDocument};
use piggy_storage_json::JsonDocumentStorage;
use std::fs;
use tempfile::tempdir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

#[test]
fn json_storage_round_trips_both_documents() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonDocumentStorage::new(dir.path().join("data")).expect("create storage");
    let now = day(2).and_hms_opt(9, 30, 0).unwrap();

    let mut finance = FinanceDocument::new(now);
    LedgerService::set_budget(&mut finance, Period::Day, 2500.0, now);
    LedgerService::add_expense(&mut finance, "Bakery", 180.0, ExpenseCategory::Food, now);
    LedgerService::save_today_summary(&mut finance, day(1));
    let mut piggy_bank = PiggyBankDocument::default();
    GoalService::create_goal(&mut piggy_bank, "Tent", 15000.0, day(30), day(2)).expect("create");
    piggy_bank.transferred_dates.insert(day(1));

    storage.save_finance(&finance).expect("save finance");
    storage.save_piggy_bank(&piggy_bank).expect("save piggy bank");

    assert_eq!(storage.load_finance().expect("load finance"), Some(finance));
    assert_eq!(storage.load_piggy_bank().expect("load piggy bank"), Some(piggy_bank));
    assert!(storage.finance_path().exists());
    assert!(!storage.finance_path().with_extension("json.tmp").exists());
}

#[test]
fn json_storage_reports_missing_documents_as_none() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonDocumentStorage::new(dir.path().to_path_buf()).expect("create storage");

    assert!(storage.load_finance().expect("load finance").is_none());
    assert!(storage.load_piggy_bank().expect("load piggy bank").is_none());
}

#[test]
fn json_storage_migrates_legacy_viewed_date() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonDocumentStorage::new(dir.path().to_path_buf()).expect("create storage");
    let finance = FinanceDocument::new(day(5).and_hms_opt(8, 0, 0).unwrap());
    let mut value = serde_json::to_value(&finance).expect("to value");
    value["last_viewed_summary_date"] = serde_json::json!("2025-06-04");
    fs::write(storage.finance_path(), value.to_string()).expect("write legacy file");

    let loaded = storage.load_finance().expect("load finance").expect("document");
    assert!(loaded.is_summary_viewed(day(4)));

    storage.save_finance(&loaded).expect("save finance");
    let raw = fs::read_to_string(storage.finance_path()).expect("read");
    assert!(!raw.contains("last_viewed_summary_date"));
}

#[test]
fn json_storage_surfaces_corrupt_documents() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonDocumentStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.piggy_bank_path(), "{ not json").expect("write");

    assert!(matches!(storage.load_piggy_bank(), Err(CoreError::Serde(_))));
}

#[test]
fn json_storage_clear_removes_documents() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonDocumentStorage::new(dir.path().to_path_buf()).expect("create storage");
    storage
        .save_piggy_bank(&PiggyBankDocument::default())
        .expect("save piggy bank");

    storage.clear().expect("clear");
    assert!(!storage.piggy_bank_path().exists());
    assert!(storage.load_piggy_bank().expect("load").is_none());
    storage.clear().expect("clearing twice is fine");
}
