//! Committed expenses and their categories.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    #[default]
    Food,
    Transport,
    Entertainment,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    /// Symbol name the presentation layer renders next to the expense.
    pub fn icon(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "cart.fill",
            ExpenseCategory::Transport => "bus.fill",
            ExpenseCategory::Entertainment => "gamecontroller.fill",
            ExpenseCategory::Shopping => "bag.fill",
            ExpenseCategory::Other => "questionmark.circle.fill",
        }
    }

    /// Lenient parse; anything unrecognised lands in [`ExpenseCategory::Other`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" | "groceries" => ExpenseCategory::Food,
            "transport" | "travel" => ExpenseCategory::Transport,
            "entertainment" | "fun" => ExpenseCategory::Entertainment,
            "shopping" => ExpenseCategory::Shopping,
            _ => ExpenseCategory::Other,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// An expense the user actually made. Immutable once logged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommittedExpense {
    pub id: Uuid,
    pub icon: String,
    pub title: String,
    pub time_label: String,
    pub amount: f64,
    pub date: NaiveDateTime,
    pub category: ExpenseCategory,
}

impl CommittedExpense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            icon: category.icon().to_string(),
            title: title.into(),
            time_label: at.format("%H:%M").to_string(),
            amount,
            date: at,
            category,
        }
    }
}

impl Identifiable for CommittedExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for CommittedExpense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn committed_expense_derives_icon_and_time_label() {
        let at = NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(9, 5, 40)
            .unwrap();
        let expense = CommittedExpense::new("Bus ticket", 120.0, ExpenseCategory::Transport, at);
        assert_eq!(expense.icon, "bus.fill");
        assert_eq!(expense.time_label, "09:05");
        assert_eq!(expense.date, at);
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        assert_eq!(ExpenseCategory::parse("Shopping"), ExpenseCategory::Shopping);
        assert_eq!(ExpenseCategory::parse("rent"), ExpenseCategory::Other);
    }
}
