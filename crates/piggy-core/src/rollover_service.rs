//! Calendar-day rollover: archive the finished day and allocate the next daily budget.

use chrono::{Duration, NaiveDateTime, Weekday};
use tracing::{debug, info, warn};

use piggy_domain::{
    date_key, start_of_day, week_start, DailySummaryRecord, DateKey, FinanceDocument, PeriodBudget,
};

use crate::ledger_service::LedgerService;

/// What a rollover did to the finance document.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloverReport {
    pub previous: DateKey,
    pub today: DateKey,
    pub archived_expenses: usize,
    /// The stored record for `previous`, whether created now or earlier.
    pub summary: DailySummaryRecord,
    pub daily_budget: f64,
}

pub struct RolloverService;

impl RolloverService {
    /// Runs the rollover when the calendar day of `now` differs from the ledger's last active day.
    ///
    /// Returns `None` when the ledger is already current or the clock moved backwards.
    pub fn check_and_handle_day_change(
        ledger: &mut FinanceDocument,
        now: NaiveDateTime,
        first_weekday: Weekday,
    ) -> Option<RolloverReport> {
        let today = date_key(now);
        let previous = ledger.last_active_date;
        if today == previous {
            debug!(%today, "ledger already current");
            return None;
        }
        if today < previous {
            warn!(%today, last_active = %previous, "clock is behind the last active day; skipping rollover");
            return None;
        }
        Some(Self::handle_day_change(ledger, previous, today, first_weekday))
    }

    fn handle_day_change(
        ledger: &mut FinanceDocument,
        previous: DateKey,
        today: DateKey,
        first_weekday: Weekday,
    ) -> RolloverReport {
        let archived_expenses = ledger.today_expenses.len();
        if archived_expenses > 0 {
            ledger
                .expense_history
                .insert(previous, ledger.today_expenses.clone());
        }
        let summary = LedgerService::save_today_summary(ledger, previous);
        ledger.today_expenses.clear();

        let daily_budget = Self::allocate_daily_budget(ledger, today, first_weekday);
        ledger.day.budget = PeriodBudget::new(daily_budget, start_of_day(today));
        ledger.last_active_date = today;

        info!(
            %previous,
            %today,
            archived_expenses,
            saved = summary.saved,
            daily_budget,
            "day rollover complete"
        );
        RolloverReport {
            previous,
            today,
            archived_expenses,
            summary,
            daily_budget,
        }
    }

    /// Computes the daily budget for `today`, capped by what is left of the weekly budget.
    ///
    /// Without a positive weekly budget the current daily amount carries over unchanged.
    pub fn allocate_daily_budget(
        ledger: &FinanceDocument,
        today: DateKey,
        first_weekday: Weekday,
    ) -> f64 {
        let previous_daily = ledger.day.budget.amount;
        let weekly = ledger.week.budget.amount;
        if weekly <= 0.0 {
            return previous_daily;
        }

        let start = week_start(today, first_weekday);
        let spent: f64 = start
            .iter_days()
            .take_while(|day| *day < today)
            .map(|day| ledger.recorded_spend(day))
            .fold(0.0, |acc, amount| acc + amount);
        let remaining_weekly = (weekly - spent).max(0.0);
        let days_left = ((start + Duration::days(7)) - today).num_days().max(1);
        let candidate = remaining_weekly / days_left as f64;

        if previous_daily > 0.0 {
            candidate.min(previous_daily)
        } else {
            candidate
        }
    }
}
