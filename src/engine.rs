//! Coordinates the ledger, the summary scheduler and the piggy bank for one session.
//!
//! Every mutation runs synchronously, persists the documents it touched and
//! queues any notification signals in an outbox. Signals reach the
//! presentation layer only through [`Engine::deliver_signals`].

use std::{collections::VecDeque, path::Path, sync::Arc};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use piggy_config::{Settings, SettingsManager};
use piggy_core::{
    Clock, DailySummaryScheduler, DocumentStorage, GoalService, LedgerService, RolloverService,
    TransferOutcome,
};
use piggy_domain::{
    CommittedExpense, CompletedGoal, DailySaving, DailySummaryRecord, DateKey, ExpenseCategory,
    FinanceDocument, Period, PiggyBankDocument, PlannedExpense, SavingsGoal,
};
use piggy_storage_json::JsonDocumentStorage;

use crate::errors::Result;

/// Intent emitted by the engine for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineSignal {
    ShowSummary(DailySummaryRecord),
    PromptNewGoal,
}

/// Consumer of engine signals, typically the UI.
pub trait NotificationSink {
    fn present_summary(&mut self, record: &DailySummaryRecord);

    fn prompt_new_goal(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
struct Dirty {
    finance: bool,
    piggy_bank: bool,
    settings: bool,
}

pub struct Engine {
    clock: Arc<dyn Clock>,
    storage: Box<dyn DocumentStorage>,
    settings_store: Option<SettingsManager>,
    settings: Settings,
    finance: FinanceDocument,
    piggy_bank: PiggyBankDocument,
    scheduler: DailySummaryScheduler,
    outbox: VecDeque<EngineSignal>,
    dirty: Dirty,
}

impl Engine {
    /// Loads both documents and brings the ledger up to the current day.
    ///
    /// Unreadable documents are replaced by fresh ones.
    pub fn open(storage: Box<dyn DocumentStorage>, settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let finance = match storage.load_finance() {
            Ok(Some(document)) => document,
            Ok(None) => FinanceDocument::new(now),
            Err(err) => {
                warn!(error = %err, "failed to load finance document; starting from defaults");
                FinanceDocument::new(now)
            }
        };
        let piggy_bank = match storage.load_piggy_bank() {
            Ok(Some(document)) => document,
            Ok(None) => PiggyBankDocument::default(),
            Err(err) => {
                warn!(error = %err, "failed to load piggy bank document; starting from defaults");
                PiggyBankDocument::default()
            }
        };

        let mut engine = Self {
            clock,
            storage,
            settings_store: None,
            settings,
            finance,
            piggy_bank,
            scheduler: DailySummaryScheduler::new(),
            outbox: VecDeque::new(),
            dirty: Dirty::default(),
        };
        engine.run_rollover();
        engine.persist();
        engine
    }

    /// Opens the JSON documents and settings stored under `data_dir`.
    pub fn open_at(data_dir: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let storage = JsonDocumentStorage::new(data_dir.to_path_buf())?;
        let settings_store = SettingsManager::with_base_dir(data_dir.to_path_buf())?;
        let settings = settings_store.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to load settings; using defaults");
            Settings::default()
        });
        Ok(Self::open(Box::new(storage), settings, clock).with_settings_store(settings_store))
    }

    /// Persists settings changes through `store`.
    pub fn with_settings_store(mut self, store: SettingsManager) -> Self {
        self.settings_store = Some(store);
        self
    }

    pub fn finance(&self) -> &FinanceDocument {
        &self.finance
    }

    pub fn piggy_bank(&self) -> &PiggyBankDocument {
        &self.piggy_bank
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn pending_summary(&self) -> Option<DateKey> {
        self.scheduler.pending()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.finance || self.dirty.piggy_bank || self.dirty.settings
    }

    /// Foreground activation: rollover first, then the summary scheduler.
    pub fn activate(&mut self) {
        let now = self.clock.now();
        self.run_rollover();

        let summaries = self.finance.daily_summary_history.len();
        let transferred = self.piggy_bank.transferred_dates.len();
        let selection = self.scheduler.evaluate(
            &mut self.finance,
            &mut self.piggy_bank,
            self.settings.summary_schedule(),
            now,
        );
        self.dirty.finance |= self.finance.daily_summary_history.len() != summaries;
        self.dirty.piggy_bank |= self.piggy_bank.transferred_dates.len() != transferred;
        if let Some(selection) = selection {
            self.outbox
                .push_back(EngineSignal::ShowSummary(selection.record));
        }
        self.persist();
    }

    /// Hands every queued signal to `sink`, oldest first. Returns how many were delivered.
    pub fn deliver_signals(&mut self, sink: &mut dyn NotificationSink) -> usize {
        let mut delivered = 0;
        while let Some(signal) = self.outbox.pop_front() {
            match &signal {
                EngineSignal::ShowSummary(record) => sink.present_summary(record),
                EngineSignal::PromptNewGoal => sink.prompt_new_goal(),
            }
            delivered += 1;
        }
        delivered
    }

    /// Acknowledges the summary popup currently shown.
    pub fn dismiss_summary(&mut self) -> Option<DateKey> {
        let (day, transfer) = self
            .scheduler
            .dismiss(&mut self.finance, &mut self.piggy_bank)?;
        self.dirty.finance = true;
        self.dirty.piggy_bank |= transfer_recorded(transfer);
        self.persist();
        Some(day)
    }

    pub fn set_budget(&mut self, period: Period, amount: f64) {
        LedgerService::set_budget(&mut self.finance, period, amount, self.clock.now());
        self.finance_changed();
    }

    pub fn add_planned_expense(&mut self, period: Period, expense: PlannedExpense) -> Uuid {
        let id = LedgerService::add_planned_expense(&mut self.finance, period, expense);
        self.finance_changed();
        id
    }

    pub fn remove_planned_expense(&mut self, period: Period, id: Uuid) -> bool {
        let removed = LedgerService::remove_planned_expense(&mut self.finance, period, id);
        if removed {
            self.finance_changed();
        }
        removed
    }

    pub fn add_expense(
        &mut self,
        title: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
    ) -> CommittedExpense {
        let now = self.clock.now();
        self.run_rollover();
        let expense = LedgerService::add_expense(&mut self.finance, title, amount, category, now);
        self.finance_changed();
        expense
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<CommittedExpense> {
        let expense = LedgerService::remove_expense(&mut self.finance, id)?;
        self.finance_changed();
        Ok(expense)
    }

    pub fn create_goal(
        &mut self,
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
    ) -> Result<SavingsGoal> {
        let today = self.clock.today();
        let goal =
            GoalService::create_goal(&mut self.piggy_bank, title, target_amount, deadline, today)?
                .clone();
        self.piggy_bank_changed();
        Ok(goal)
    }

    pub fn edit_goal(
        &mut self,
        title: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
    ) -> Result<SavingsGoal> {
        let goal = GoalService::edit_goal(&mut self.piggy_bank, title, target_amount, deadline)?
            .clone();
        self.piggy_bank_changed();
        Ok(goal)
    }

    /// Manual deposit, dated `date` or today when not given.
    pub fn add_saving(
        &mut self,
        amount: f64,
        date: Option<NaiveDate>,
        note: Option<String>,
    ) -> Result<DailySaving> {
        let date = date.unwrap_or_else(|| self.clock.today());
        let saving = GoalService::add_saving(&mut self.piggy_bank, amount, date, note)?;
        self.piggy_bank_changed();
        Ok(saving)
    }

    /// Withdraws a completed goal and asks the UI to prompt for a new one.
    pub fn withdraw(&mut self) -> Result<CompletedGoal> {
        let completed = GoalService::withdraw(&mut self.piggy_bank, self.clock.today())?;
        self.outbox.push_back(EngineSignal::PromptNewGoal);
        self.piggy_bank_changed();
        Ok(completed)
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.dirty.settings = self.settings_store.is_some();
        self.persist();
    }

    /// Deletes every stored document and resets the session to a fresh install.
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.storage.clear()?;
        if let Some(store) = &self.settings_store {
            store.clear()?;
        }
        self.finance = FinanceDocument::new(self.clock.now());
        self.piggy_bank = PiggyBankDocument::default();
        self.settings = Settings::default();
        self.scheduler = DailySummaryScheduler::new();
        self.outbox.clear();
        self.dirty = Dirty::default();
        info!("all data cleared");
        Ok(())
    }

    /// Writes every dirty document, stopping at the first failure.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty.finance {
            self.storage.save_finance(&self.finance)?;
            self.dirty.finance = false;
        }
        if self.dirty.piggy_bank {
            self.storage.save_piggy_bank(&self.piggy_bank)?;
            self.dirty.piggy_bank = false;
        }
        if self.dirty.settings {
            if let Some(store) = &self.settings_store {
                store.save(&self.settings)?;
            }
            self.dirty.settings = false;
        }
        Ok(())
    }

    pub fn status(&self) -> StatusReport {
        let today = self.clock.today();
        StatusReport {
            date: today,
            currency: self.settings.currency.symbol(),
            daily_budget: self.finance.day.budget.amount,
            weekly_budget: self.finance.week.budget.amount,
            monthly_budget: self.finance.month.budget.amount,
            today_spent: self.finance.today_spent(),
            daily_remaining: self.finance.daily_remaining(),
            spent_percentage: self.finance.spent_percentage(),
            total_saved: GoalService::total_saved(&self.piggy_bank),
            goal: self
                .piggy_bank
                .savings_goal
                .as_ref()
                .map(|goal| GoalStatus::new(goal, today)),
            completed_goals: self.piggy_bank.completed_goals.len(),
        }
    }

    fn run_rollover(&mut self) {
        let report = RolloverService::check_and_handle_day_change(
            &mut self.finance,
            self.clock.now(),
            self.settings.week_start,
        );
        self.dirty.finance |= report.is_some();
    }

    fn finance_changed(&mut self) {
        self.dirty.finance = true;
        self.persist();
    }

    fn piggy_bank_changed(&mut self) {
        self.dirty.piggy_bank = true;
        self.persist();
    }

    /// Saves dirty documents. Failures keep them dirty for the next mutation to retry.
    fn persist(&mut self) {
        if !self.has_unsaved_changes() {
            debug!("nothing to persist");
            return;
        }
        if let Err(err) = self.flush() {
            warn!(error = %err, "failed to persist documents; will retry on next change");
        }
    }
}

fn transfer_recorded(outcome: TransferOutcome) -> bool {
    matches!(
        outcome,
        TransferOutcome::Credited { .. } | TransferOutcome::NothingSaved
    )
}

/// Snapshot of the session rendered by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub date: NaiveDate,
    pub currency: &'static str,
    pub daily_budget: f64,
    pub weekly_budget: f64,
    pub monthly_budget: f64,
    pub today_spent: f64,
    pub daily_remaining: f64,
    pub spent_percentage: f64,
    pub total_saved: f64,
    pub goal: Option<GoalStatus>,
    pub completed_goals: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalStatus {
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub progress_percentage: f64,
    pub days_remaining: i64,
    pub recommended_daily_amount: f64,
    pub completed: bool,
}

impl GoalStatus {
    fn new(goal: &SavingsGoal, today: NaiveDate) -> Self {
        Self {
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            progress_percentage: goal.progress_percentage(),
            days_remaining: goal.days_remaining(today),
            recommended_daily_amount: goal.recommended_daily_amount(today),
            completed: goal.is_completed(),
        }
    }
}
