//! Moves a finished day's leftover budget into the piggy bank, once per day.

use tracing::{debug, info};

use piggy_domain::{DailySaving, DateKey, FinanceDocument, PiggyBankDocument, BUDGET_REMAINDER_NOTE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransferOutcome {
    /// The day was credited earlier; nothing changed.
    AlreadyTransferred,
    /// No summary record exists for the day; the day stays eligible.
    NoSummary,
    /// The day closed without savings; it is marked as transferred.
    NothingSaved,
    Credited { amount: f64, goal_credited: bool },
}

pub struct TransferService;

impl TransferService {
    pub fn transfer(
        finance: &FinanceDocument,
        piggy_bank: &mut PiggyBankDocument,
        day: DateKey,
    ) -> TransferOutcome {
        if piggy_bank.is_transferred(day) {
            debug!(%day, "leftover already transferred");
            return TransferOutcome::AlreadyTransferred;
        }
        let Some(record) = finance.summary(day) else {
            debug!(%day, "no summary record to transfer from");
            return TransferOutcome::NoSummary;
        };

        let outcome = if record.saved > 0.0 {
            piggy_bank.daily_savings.push(DailySaving::new(
                day,
                record.saved,
                Some(BUDGET_REMAINDER_NOTE.to_string()),
            ));
            let goal_credited = match piggy_bank.savings_goal.as_mut() {
                Some(goal) => {
                    goal.current_amount += record.saved;
                    true
                }
                None => false,
            };
            info!(%day, amount = record.saved, goal_credited, "budget remainder transferred");
            TransferOutcome::Credited {
                amount: record.saved,
                goal_credited,
            }
        } else {
            TransferOutcome::NothingSaved
        };
        piggy_bank.transferred_dates.insert(day);
        outcome
    }
}
