//! Period budgets and the planned expenses attached to them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, expense::ExpenseCategory};

/// Budget amount for one period, stamped with the moment it was last replaced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeriodBudget {
    pub amount: f64,
    pub last_updated: NaiveDateTime,
}

impl PeriodBudget {
    pub fn new(amount: f64, last_updated: NaiveDateTime) -> Self {
        Self {
            amount,
            last_updated,
        }
    }

    /// A zero budget, as held by a fresh document.
    pub fn empty(at: NaiveDateTime) -> Self {
        Self::new(0.0, at)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedExpense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    /// Only meaningful for expenses planned against the day period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl PlannedExpense {
    pub fn new(title: impl Into<String>, amount: f64, category: ExpenseCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category,
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl Identifiable for PlannedExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for PlannedExpense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Budget, planned list pair held for each [`Period`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodPlan {
    pub budget: PeriodBudget,
    #[serde(default)]
    pub planned: Vec<PlannedExpense>,
}

impl PeriodPlan {
    pub fn empty(at: NaiveDateTime) -> Self {
        Self {
            budget: PeriodBudget::empty(at),
            planned: Vec::new(),
        }
    }

    pub fn total_planned(&self) -> f64 {
        total_amount(&self.planned)
    }
}
