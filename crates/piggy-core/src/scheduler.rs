//! Decides which past day's summary popup to surface, one at a time.

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info};

use piggy_domain::{
    date_key, DailySummaryRecord, DateKey, FinanceDocument, PiggyBankDocument, SummarySchedule,
};

use crate::{
    ledger_service::LedgerService,
    transfer_service::{TransferOutcome, TransferService},
};

/// How many days back an unviewed summary is still offered.
pub const SUMMARY_LOOKBACK_DAYS: i64 = 7;

/// A summary chosen for display together with the transfer run on selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySelection {
    pub record: DailySummaryRecord,
    pub transfer: TransferOutcome,
}

/// Session-scoped scheduler state. Only the pending day and the last check day live here.
#[derive(Debug, Clone, Default)]
pub struct DailySummaryScheduler {
    last_check: Option<DateKey>,
    pending: Option<DateKey>,
}

impl DailySummaryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<DateKey> {
        self.pending
    }

    pub fn last_check(&self) -> Option<DateKey> {
        self.last_check
    }

    /// Runs one scheduling pass. At most one summary is selected while none is pending.
    pub fn evaluate(
        &mut self,
        finance: &mut FinanceDocument,
        piggy_bank: &mut PiggyBankDocument,
        schedule: SummarySchedule,
        now: NaiveDateTime,
    ) -> Option<SummarySelection> {
        let today = date_key(now);
        if self.last_check == Some(today) {
            debug!(%today, "summary check already ran this session");
            return None;
        }
        if let Some(pending) = self.pending {
            debug!(%pending, "summary popup still pending");
            return None;
        }
        self.last_check = Some(today);

        if !schedule.enabled {
            return None;
        }
        if now >= schedule.due_at(today) && finance.summary(today).is_none() {
            LedgerService::save_today_summary(finance, today);
        }

        let day = (1..=SUMMARY_LOOKBACK_DAYS)
            .map(|days_ago| today - Duration::days(days_ago))
            .filter(|day| now >= schedule.due_at(*day))
            .find(|day| !finance.is_summary_viewed(*day))?;

        let transfer = TransferService::transfer(finance, piggy_bank, day);
        let record = Self::display_record(finance, day);
        self.pending = Some(day);
        info!(%day, "daily summary selected");
        Some(SummarySelection { record, transfer })
    }

    /// Acknowledges the pending popup: marks the day viewed and retries its transfer.
    pub fn dismiss(
        &mut self,
        finance: &mut FinanceDocument,
        piggy_bank: &mut PiggyBankDocument,
    ) -> Option<(DateKey, TransferOutcome)> {
        let day = self.pending.take()?;
        LedgerService::mark_summary_viewed(finance, day);
        let transfer = TransferService::transfer(finance, piggy_bank, day);
        Some((day, transfer))
    }

    /// Stored record for `day`, or a zero-budget placeholder when the day was never recorded.
    fn display_record(finance: &FinanceDocument, day: DateKey) -> DailySummaryRecord {
        match finance.summary(day) {
            Some(record) => *record,
            None => DailySummaryRecord::new(day, 0.0, finance.archived_spend(day).unwrap_or(0.0)),
        }
    }
}
