//! Budget and expense mutations over the finance document.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use uuid::Uuid;

use piggy_domain::{
    remove_by_id, CommittedExpense, DailySummaryRecord, DateKey, ExpenseCategory, FinanceDocument,
    Period, PeriodBudget, PlannedExpense,
};

use crate::CoreError;

/// Provides the per-period budget operations and today's expense bucket.
pub struct LedgerService;

impl LedgerService {
    /// Replaces the budget for `period`. Negative amounts are stored as given.
    pub fn set_budget(ledger: &mut FinanceDocument, period: Period, amount: f64, now: NaiveDateTime) {
        ledger.plan_mut(period).budget = PeriodBudget::new(amount, now);
    }

    pub fn budget(ledger: &FinanceDocument, period: Period) -> PeriodBudget {
        ledger.budget(period)
    }

    pub fn add_planned_expense(
        ledger: &mut FinanceDocument,
        period: Period,
        expense: PlannedExpense,
    ) -> Uuid {
        let id = expense.id;
        ledger.plan_mut(period).planned.push(expense);
        id
    }

    /// Removes a planned expense; returns `false` when `id` is not in that period's list.
    pub fn remove_planned_expense(ledger: &mut FinanceDocument, period: Period, id: Uuid) -> bool {
        let removed = remove_by_id(&mut ledger.plan_mut(period).planned, id).is_some();
        if !removed {
            debug!(%id, %period, "planned expense not found");
        }
        removed
    }

    pub fn planned_expenses(ledger: &FinanceDocument, period: Period) -> &[PlannedExpense] {
        &ledger.plan(period).planned
    }

    pub fn total_planned(ledger: &FinanceDocument, period: Period) -> f64 {
        ledger.plan(period).total_planned()
    }

    /// Logs an expense against today. The newest expense is kept first.
    pub fn add_expense(
        ledger: &mut FinanceDocument,
        title: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        now: NaiveDateTime,
    ) -> CommittedExpense {
        let expense = CommittedExpense::new(title, amount, category, now);
        ledger.today_expenses.insert(0, expense.clone());
        expense
    }

    pub fn remove_expense(ledger: &mut FinanceDocument, id: Uuid) -> Result<CommittedExpense, CoreError> {
        remove_by_id(&mut ledger.today_expenses, id).ok_or(CoreError::ExpenseNotFound(id))
    }

    /// Stores the summary for `day` from the current daily budget and today's spend.
    ///
    /// An existing record is never overwritten; the stored record is returned either way.
    pub fn save_today_summary(ledger: &mut FinanceDocument, day: DateKey) -> DailySummaryRecord {
        let budget = ledger.day.budget.amount;
        let spent = ledger.today_spent();
        *ledger
            .daily_summary_history
            .entry(day)
            .or_insert_with(|| DailySummaryRecord::new(day, budget, spent))
    }

    pub fn summary_for(ledger: &FinanceDocument, day: NaiveDate) -> Option<DailySummaryRecord> {
        ledger.summary(day).copied()
    }

    /// Returns `true` when the day was not already marked.
    pub fn mark_summary_viewed(ledger: &mut FinanceDocument, day: DateKey) -> bool {
        ledger.viewed_summary_dates.insert(day)
    }

    pub fn is_summary_viewed(ledger: &FinanceDocument, day: DateKey) -> bool {
        ledger.is_summary_viewed(day)
    }
}
