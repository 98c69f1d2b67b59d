//! Savings goal ("piggy bank") models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Note attached to savings credited automatically from an unspent daily budget.
pub const BUDGET_REMAINDER_NOTE: &str = "Budget remainder";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub deadline: NaiveDate,
    /// Day the goal was created; becomes the start date of its completed snapshot.
    pub started_on: NaiveDate,
}

impl SavingsGoal {
    pub fn new(
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
        started_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            started_on,
        }
    }

    /// Derived completion predicate; there is no stored flag.
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Progress in percent, capped at 100.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        ((self.current_amount / self.target_amount) * 100.0).min(100.0)
    }

    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days().max(0)
    }

    /// Amount to put aside per day to hit the target by the deadline.
    pub fn recommended_daily_amount(&self, today: NaiveDate) -> f64 {
        let days = self.days_remaining(today);
        let remaining = self.remaining_amount();
        if days > 0 && remaining > 0.0 {
            remaining / days as f64
        } else {
            0.0
        }
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// One accrual event, automatic or manual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySaving {
    pub id: Uuid,
    pub date: DateKey,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DailySaving {
    pub fn new(date: DateKey, amount: f64, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            note,
        }
    }
}

impl Identifiable for DailySaving {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for DailySaving {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Snapshot of a goal taken at withdrawal time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedGoal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: f64,
    pub achieved_amount: f64,
    pub start_date: NaiveDate,
    pub completed_date: NaiveDate,
}

impl CompletedGoal {
    pub fn from_goal(goal: &SavingsGoal, completed_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            achieved_amount: goal.current_amount,
            start_date: goal.started_on,
            completed_date,
        }
    }

    pub fn duration_in_days(&self) -> i64 {
        (self.completed_date - self.start_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn recommended_daily_amount_spreads_remaining_over_days_left() {
        let mut goal = SavingsGoal::new("Bike", 10_000.0, day(2025, 1, 11), day(2025, 1, 1));
        goal.current_amount = 4_000.0;
        assert_eq!(goal.days_remaining(day(2025, 1, 1)), 10);
        assert_eq!(goal.recommended_daily_amount(day(2025, 1, 1)), 600.0);
        assert_eq!(goal.progress_percentage(), 40.0);
    }

    #[test]
    fn recommended_daily_amount_is_zero_after_deadline_or_when_done() {
        let mut goal = SavingsGoal::new("Bike", 10_000.0, day(2025, 1, 11), day(2025, 1, 1));
        assert_eq!(goal.days_remaining(day(2025, 2, 1)), 0);
        assert_eq!(goal.recommended_daily_amount(day(2025, 2, 1)), 0.0);

        goal.current_amount = 12_000.0;
        assert!(goal.is_completed());
        assert_eq!(goal.remaining_amount(), 0.0);
        assert_eq!(goal.progress_percentage(), 100.0);
        assert_eq!(goal.recommended_daily_amount(day(2025, 1, 2)), 0.0);
    }

    #[test]
    fn completed_goal_snapshots_amounts_and_dates() {
        let mut goal = SavingsGoal::new("Laptop", 100_000.0, day(2025, 6, 1), day(2025, 1, 1));
        goal.current_amount = 100_000.0;
        let done = CompletedGoal::from_goal(&goal, day(2025, 3, 2));
        assert_eq!(done.achieved_amount, 100_000.0);
        assert_eq!(done.duration_in_days(), 60);
    }
}
