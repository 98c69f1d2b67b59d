//! Savings goal lifecycle: create, edit, deposit, withdraw, and savings analytics.

use chrono::{Duration, NaiveDate};
use tracing::info;

use piggy_domain::{CompletedGoal, DailySaving, DateKey, PiggyBankDocument, SavingsGoal};

use crate::CoreError;

pub struct GoalService;

impl GoalService {
    /// Starts a new goal. Only one goal may be active at a time.
    pub fn create_goal(
        piggy_bank: &mut PiggyBankDocument,
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
        today: NaiveDate,
    ) -> Result<&SavingsGoal, CoreError> {
        if piggy_bank.savings_goal.is_some() {
            return Err(CoreError::GoalAlreadyActive);
        }
        let goal = SavingsGoal::new(title, target_amount, deadline, today);
        info!(title = %goal.title, target_amount, %deadline, "savings goal created");
        Ok(&*piggy_bank.savings_goal.insert(goal))
    }

    /// Updates title, target and deadline while keeping the amount saved so far.
    pub fn edit_goal(
        piggy_bank: &mut PiggyBankDocument,
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
    ) -> Result<&SavingsGoal, CoreError> {
        let goal = piggy_bank
            .savings_goal
            .as_mut()
            .ok_or(CoreError::GoalNotFound)?;
        goal.title = title.into();
        goal.target_amount = target_amount;
        goal.deadline = deadline;
        Ok(&*goal)
    }

    /// Records a saving entry and credits the active goal, if any.
    ///
    /// Amounts must be positive and finite.
    pub fn add_saving(
        piggy_bank: &mut PiggyBankDocument,
        amount: f64,
        date: DateKey,
        note: Option<String>,
    ) -> Result<DailySaving, CoreError> {
        if amount <= 0.0 || !amount.is_finite() {
            return Err(CoreError::InvalidOperation(format!(
                "saving amount must be positive, got {amount}"
            )));
        }
        let saving = DailySaving::new(date, amount, note);
        piggy_bank.daily_savings.push(saving.clone());
        if let Some(goal) = piggy_bank.savings_goal.as_mut() {
            goal.current_amount += amount;
        }
        Ok(saving)
    }

    /// Closes a completed goal: snapshots it into history and clears the savings entries.
    ///
    /// The transferred-day set is kept so past days are never credited twice.
    pub fn withdraw(
        piggy_bank: &mut PiggyBankDocument,
        today: NaiveDate,
    ) -> Result<CompletedGoal, CoreError> {
        let goal = piggy_bank
            .savings_goal
            .as_ref()
            .ok_or(CoreError::GoalNotFound)?;
        if !goal.is_completed() {
            return Err(CoreError::GoalNotCompleted);
        }
        let completed = CompletedGoal::from_goal(goal, today);
        piggy_bank.completed_goals.insert(0, completed.clone());
        piggy_bank.savings_goal = None;
        piggy_bank.daily_savings.clear();
        info!(
            title = %completed.title,
            achieved = completed.achieved_amount,
            "savings goal withdrawn"
        );
        Ok(completed)
    }

    pub fn total_saved(piggy_bank: &PiggyBankDocument) -> f64 {
        piggy_bank.total_saved()
    }

    pub fn max_daily_saving(piggy_bank: &PiggyBankDocument) -> f64 {
        piggy_bank
            .daily_savings
            .iter()
            .map(|saving| saving.amount)
            .fold(0.0, f64::max)
    }

    pub fn average_daily_saving(piggy_bank: &PiggyBankDocument) -> f64 {
        let count = piggy_bank.daily_savings.len();
        if count == 0 {
            return 0.0;
        }
        piggy_bank.total_saved() / count as f64
    }

    /// Per-day saving totals for the `days` days ending at `today`, oldest first, zero-filled.
    pub fn savings_for_last_days(
        piggy_bank: &PiggyBankDocument,
        days: u32,
        today: NaiveDate,
    ) -> Vec<(DateKey, f64)> {
        (0..i64::from(days))
            .rev()
            .map(|offset| {
                let day = today - Duration::days(offset);
                let total: f64 = piggy_bank
                    .daily_savings
                    .iter()
                    .filter(|saving| saving.date == day)
                    .map(|saving| saving.amount)
                    .fold(0.0, |acc, amount| acc + amount);
                (day, total)
            })
            .collect()
    }
}
