//! The independently persisted documents: finance (ledger) and piggy bank (goal).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    budget::{PeriodBudget, PeriodPlan},
    common::*,
    expense::CommittedExpense,
    savings::{CompletedGoal, DailySaving, SavingsGoal},
    summary::DailySummaryRecord,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Budgets, expenses and the day-keyed history owned by the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceDocument {
    #[serde(default = "FinanceDocument::schema_version_default")]
    pub schema_version: u8,
    pub day: PeriodPlan,
    pub week: PeriodPlan,
    pub month: PeriodPlan,
    #[serde(default)]
    pub today_expenses: Vec<CommittedExpense>,
    pub last_active_date: DateKey,
    #[serde(default)]
    pub expense_history: BTreeMap<DateKey, Vec<CommittedExpense>>,
    #[serde(default)]
    pub viewed_summary_dates: BTreeSet<DateKey>,
    #[serde(default)]
    pub daily_summary_history: BTreeMap<DateKey, DailySummaryRecord>,
    /// Older documents tracked only the most recently viewed summary.
    #[serde(default, rename = "last_viewed_summary_date", skip_serializing)]
    legacy_last_viewed: Option<DateKey>,
}

impl FinanceDocument {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            day: PeriodPlan::empty(now),
            week: PeriodPlan::empty(now),
            month: PeriodPlan::empty(now),
            today_expenses: Vec::new(),
            last_active_date: date_key(now),
            expense_history: BTreeMap::new(),
            viewed_summary_dates: BTreeSet::new(),
            daily_summary_history: BTreeMap::new(),
            legacy_last_viewed: None,
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    /// Folds a legacy single viewed date into the viewed set. Returns `true` when
    /// the document changed.
    pub fn migrate_legacy(&mut self) -> bool {
        let mut changed = false;
        if let Some(date) = self.legacy_last_viewed.take() {
            self.viewed_summary_dates.insert(date);
            changed = true;
        }
        if self.schema_version < CURRENT_SCHEMA_VERSION {
            self.schema_version = CURRENT_SCHEMA_VERSION;
            changed = true;
        }
        changed
    }

    pub fn plan(&self, period: Period) -> &PeriodPlan {
        match period {
            Period::Day => &self.day,
            Period::Week => &self.week,
            Period::Month => &self.month,
        }
    }

    pub fn plan_mut(&mut self, period: Period) -> &mut PeriodPlan {
        match period {
            Period::Day => &mut self.day,
            Period::Week => &mut self.week,
            Period::Month => &mut self.month,
        }
    }

    pub fn budget(&self, period: Period) -> PeriodBudget {
        self.plan(period).budget
    }

    pub fn today_spent(&self) -> f64 {
        total_amount(&self.today_expenses)
    }

    pub fn daily_remaining(&self) -> f64 {
        self.day.budget.amount - self.today_spent()
    }

    /// Share of the daily budget already spent, clamped to `0..=1`.
    pub fn spent_percentage(&self) -> f64 {
        let budget = self.day.budget.amount;
        if budget <= 0.0 {
            return 0.0;
        }
        (self.today_spent() / budget).clamp(0.0, 1.0)
    }

    pub fn summary(&self, date: DateKey) -> Option<&DailySummaryRecord> {
        self.daily_summary_history.get(&date)
    }

    pub fn is_summary_viewed(&self, date: DateKey) -> bool {
        self.viewed_summary_dates.contains(&date)
    }

    /// Archived spend for a past day, if any expenses were archived for it.
    pub fn archived_spend(&self, date: DateKey) -> Option<f64> {
        self.expense_history
            .get(&date)
            .map(|expenses| total_amount(expenses))
    }

    /// Spend recorded for a past day: archived expenses first, then the summary record.
    pub fn recorded_spend(&self, date: DateKey) -> f64 {
        self.archived_spend(date)
            .or_else(|| self.summary(date).map(|record| record.spent))
            .unwrap_or(0.0)
    }
}

/// Active goal, saving entries and goal history owned by the piggy bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PiggyBankDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_goal: Option<SavingsGoal>,
    #[serde(default)]
    pub daily_savings: Vec<DailySaving>,
    #[serde(default)]
    pub completed_goals: Vec<CompletedGoal>,
    /// Days whose leftover budget has already been credited.
    #[serde(default)]
    pub transferred_dates: BTreeSet<DateKey>,
}

impl PiggyBankDocument {
    pub fn is_goal_completed(&self) -> bool {
        self.savings_goal
            .as_ref()
            .map(SavingsGoal::is_completed)
            .unwrap_or(false)
    }

    pub fn total_saved(&self) -> f64 {
        total_amount(&self.daily_savings)
    }

    pub fn is_transferred(&self, date: DateKey) -> bool {
        self.transferred_dates.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseCategory;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn spent_percentage_is_zero_without_budget() {
        let mut doc = FinanceDocument::new(at(1, 8));
        doc.today_expenses
            .push(CommittedExpense::new("Tea", 50.0, ExpenseCategory::Food, at(1, 9)));
        assert_eq!(doc.spent_percentage(), 0.0);
        assert_eq!(doc.daily_remaining(), -50.0);
    }

    #[test]
    fn recorded_spend_prefers_archived_expenses() {
        let mut doc = FinanceDocument::new(at(3, 8));
        let day1 = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        doc.expense_history.insert(
            day1,
            vec![CommittedExpense::new("Taxi", 300.0, ExpenseCategory::Transport, at(1, 10))],
        );
        doc.daily_summary_history
            .insert(day1, DailySummaryRecord::new(day1, 1000.0, 999.0));
        doc.daily_summary_history
            .insert(day2, DailySummaryRecord::new(day2, 1000.0, 400.0));

        assert_eq!(doc.recorded_spend(day1), 300.0);
        assert_eq!(doc.recorded_spend(day2), 400.0);
        assert_eq!(doc.recorded_spend(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()), 0.0);
    }

    #[test]
    fn finance_document_round_trips_through_json_with_date_keys() {
        let mut doc = FinanceDocument::new(at(3, 8));
        let day1 = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        doc.daily_summary_history
            .insert(day1, DailySummaryRecord::new(day1, 1000.0, 250.0));
        doc.viewed_summary_dates.insert(day1);

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"2025-05-01\""));
        let back: FinanceDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn legacy_viewed_date_is_migrated() {
        let doc = FinanceDocument::new(at(3, 8));
        let mut value = serde_json::to_value(&doc).unwrap();
        value["last_viewed_summary_date"] = serde_json::json!("2025-05-02");
        let mut loaded: FinanceDocument = serde_json::from_value(value).unwrap();

        assert!(loaded.migrate_legacy());
        assert!(loaded.is_summary_viewed(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()));
        assert!(!loaded.migrate_legacy());
    }
}
