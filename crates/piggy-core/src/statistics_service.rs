//! Read-only spending statistics over the last seven days.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use piggy_domain::{CommittedExpense, ExpenseCategory, FinanceDocument};

/// Number of transactions reported by [`StatisticsService::recent_transactions`] by default.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 10;

/// Total spend for one category over the statistics window.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
    /// Share of the window total, in `0..=1`.
    pub share: f64,
}

pub struct StatisticsService;

impl StatisticsService {
    /// Today's expenses plus the archived expenses of the previous six days, newest first.
    pub fn weekly_expenses(ledger: &FinanceDocument, today: NaiveDate) -> Vec<CommittedExpense> {
        let mut expenses = ledger.today_expenses.clone();
        for days_ago in 1..=6 {
            let day = today - Duration::days(days_ago);
            if let Some(archived) = ledger.expense_history.get(&day) {
                expenses.extend(archived.iter().cloned());
            }
        }
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    pub fn weekly_total(ledger: &FinanceDocument, today: NaiveDate) -> f64 {
        Self::weekly_expenses(ledger, today)
            .iter()
            .map(|expense| expense.amount)
            .fold(0.0, |acc, amount| acc + amount)
    }

    /// Per-category totals over the weekly window, largest first.
    pub fn category_breakdown(ledger: &FinanceDocument, today: NaiveDate) -> Vec<CategoryTotal> {
        let mut totals: BTreeMap<ExpenseCategory, f64> = BTreeMap::new();
        for expense in Self::weekly_expenses(ledger, today) {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        let grand_total = totals.values().copied().fold(0.0, |acc, amount| acc + amount);
        let mut breakdown: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category,
                amount,
                share: if grand_total > 0.0 {
                    amount / grand_total
                } else {
                    0.0
                },
            })
            .collect();
        breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        breakdown
    }

    pub fn recent_transactions(
        ledger: &FinanceDocument,
        today: NaiveDate,
        limit: usize,
    ) -> Vec<CommittedExpense> {
        let mut expenses = Self::weekly_expenses(ledger, today);
        expenses.truncate(limit);
        expenses
    }
}
