use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use predicates::str::contains;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("piggy_ledger_cli").unwrap();
    cmd.env("PIGGY_LEDGER_HOME", home.path())
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn budget_and_spend_update_the_status() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["budget", "day", "5000"])
        .assert()
        .success()
        .stdout(contains("Day budget set to 5000.00"));
    for (amount, title) in [("250", "Coffee"), ("450", "Lunch"), ("800", "Dinner")] {
        cli(&home)
            .args(["spend", amount, "food", title])
            .assert()
            .success();
    }

    cli(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Spent today:    1500.00").and(contains("(30%)")))
        .stdout(contains("Remaining:      3500.00"));
    home.child("finance.json").assert(predicate::path::exists());

    cli(&home)
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"daily_remaining\": 3500.0"));
}

#[test]
fn goal_saving_and_withdrawal() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["goal", "1000", "2999-12-31", "New", "bike"])
        .assert()
        .success()
        .stdout(contains("Saving for New bike"));
    cli(&home)
        .args(["withdraw"])
        .assert()
        .failure()
        .stderr(contains("not completed"));
    cli(&home).args(["save", "1000"]).assert().success();
    cli(&home)
        .arg("withdraw")
        .assert()
        .success()
        .stdout(contains("Withdrew 1000.00").and(contains("Set a new goal")));
    home.child("piggy_bank.json")
        .assert(predicate::str::contains("completed_goals"));
}

#[test]
fn non_positive_savings_leave_the_goal_untouched() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["goal", "1000", "2999-12-31", "Bike"])
        .assert()
        .success();
    cli(&home)
        .args(["save", "500", "2025-03-01"])
        .assert()
        .success()
        .stdout(contains("Saved 500.00").and(contains("on 2025-03-01")));
    for amount in ["-400", "0"] {
        cli(&home)
            .args(["save", amount])
            .assert()
            .failure()
            .stderr(contains("saving amount must be positive"));
    }

    cli(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Bike 500.00₽ / 1000.00₽ (50%)"));
    home.child("piggy_bank.json")
        .assert(predicate::str::contains("2025-03-01"));
}

#[test]
fn fresh_status_reports_positive_zero_totals() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Spent today:    0.00₽").and(contains("-0.00").not()));
    cli(&home)
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(contains("\"today_spent\": 0.0").and(contains("\"total_saved\": 0.0")))
        .stdout(contains("-0.0").not());
}

#[test]
fn settings_command_updates_preferences() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["settings", "currency", "euro"])
        .assert()
        .success()
        .stdout(contains("Currency:       €"));
    cli(&home)
        .args(["settings", "summary-time", "21:30"])
        .assert()
        .success()
        .stdout(contains("on at 21:30"));
    cli(&home)
        .args(["settings", "week-start", "wednesday"])
        .assert()
        .success()
        .stdout(contains("Week starts on: Wed"));
    cli(&home)
        .args(["settings", "summary", "off"])
        .assert()
        .success()
        .stdout(contains("Daily summary:  off"));
    cli(&home)
        .args(["settings", "currency", "yen"])
        .assert()
        .failure()
        .stderr(contains("is not one of ruble, dollar, euro, pound"));

    cli(&home)
        .args(["budget", "day", "100"])
        .assert()
        .success()
        .stdout(contains("100.00€"));
    home.child("config/settings.json")
        .assert(predicate::str::contains("\"week_start\": \"Wed\""));
}

#[test]
fn activate_and_dismiss_surface_the_previous_day() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .arg("activate")
        .assert()
        .success()
        .stdout(contains("Daily summary for"));
    cli(&home)
        .arg("dismiss")
        .assert()
        .success()
        .stdout(contains("marked as viewed"));
}

#[test]
fn invalid_input_is_rejected() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .args(["budget", "year", "10"])
        .assert()
        .failure()
        .stderr(contains("not one of day, week, month"));
    cli(&home)
        .args(["spend", "lots", "food", "Cake"])
        .assert()
        .failure()
        .stderr(contains("is not an amount"));
    cli(&home)
        .arg("bogus")
        .assert()
        .failure()
        .stderr(contains("Usage: piggy_ledger_cli"));
}
