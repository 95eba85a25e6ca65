//! Session
//!
//! Bundles the two stores and the edit coordinator for one user session, plus
//! the settings and UTC offset everything is interpreted in.

use chrono::{DateTime, FixedOffset, Utc};

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::MonthPeriod;
use crate::reports::{CategoryReport, MonthlySummary};
use crate::services::{aggregation, BudgetStore, BudgetUsage, EditCoordinator, TransactionLedger};
use crate::storage::{FileStore, KeyValueStore};

/// Main session object that provides access to all stores
pub struct Session {
    settings: Settings,
    offset: FixedOffset,
    pub ledger: TransactionLedger,
    pub budgets: BudgetStore,
    pub coordinator: EditCoordinator,
}

impl Session {
    /// Open the file-backed session under `paths`
    pub fn open(paths: &LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        Self::with_store(FileStore::new(paths.data_dir()), settings)
    }

    /// Open a session over any store; both keys live in the same store
    pub fn with_store<S>(store: S, settings: Settings) -> LedgerResult<Self>
    where
        S: KeyValueStore + Clone + 'static,
    {
        let offset = settings.offset()?;
        Ok(Self {
            ledger: TransactionLedger::load(Box::new(store.clone()), offset)?,
            budgets: BudgetStore::load(Box::new(store))?,
            coordinator: EditCoordinator::new(),
            settings,
            offset,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current instant in the session offset
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn current_month(&self) -> MonthPeriod {
        MonthPeriod::containing(self.now())
    }

    /// Parse a "YYYY-MM" month, defaulting to the current month
    pub fn month(&self, input: Option<&str>) -> LedgerResult<MonthPeriod> {
        match input {
            None => Ok(self.current_month()),
            Some(text) => MonthPeriod::parse(text, self.offset).ok_or_else(|| {
                LedgerError::invalid("month", format!("'{}' is not a YYYY-MM month", text))
            }),
        }
    }

    pub fn budget_usage(&self, period: &MonthPeriod) -> Vec<BudgetUsage> {
        aggregation::budget_usage_for(self.ledger.list(), &self.budgets.get(), period)
    }

    pub fn summary(&self, period: MonthPeriod) -> MonthlySummary {
        MonthlySummary::generate(self.ledger.list(), &self.budgets.get(), period)
    }

    pub fn category_report(&self, period: MonthPeriod) -> CategoryReport {
        CategoryReport::generate(self.ledger.list(), period)
    }

    /// Retry persistence of both stores
    pub fn flush_all(&self) -> LedgerResult<()> {
        self.ledger.flush()?;
        self.budgets.flush()
    }
}
