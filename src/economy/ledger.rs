//! The player's gold balance and lifetime earn/spend counters.

use std::fmt;

use tracing::{debug, warn};

use crate::core::config::LedgerConfig;
use crate::core::constants::{TOTAL_EARNED_SUFFIX, TOTAL_SPENT_SUFFIX};
use crate::core::events::Observers;
use crate::utils::persistence::{MemoryStore, PersistenceStore};

#[derive(Debug, Default)]
pub struct LedgerObservers {
    pub balance_changed: Observers<i64>,
    pub added: Observers<i64>,
    pub spent: Observers<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerStats {
    pub balance: i64,
    pub total_earned: i64,
    pub total_spent: i64,
}

impl fmt::Display for LedgerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gold: {}, earned: {}, spent: {}",
            self.balance, self.total_earned, self.total_spent
        )
    }
}

pub struct GoldLedger {
    persist_enabled: bool,
    balance_key: String,
    earned_key: String,
    spent_key: String,
    store: Box<dyn PersistenceStore>,
    balance: i64,
    total_earned: i64,
    total_spent: i64,
    pub observers: LedgerObservers,
}

impl fmt::Debug for GoldLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoldLedger")
            .field("persist", &self.persist_enabled)
            .field("balance_key", &self.balance_key)
            .field("stats", &self.stats())
            .finish()
    }
}

impl GoldLedger {
    pub fn new(config: &LedgerConfig, store: Box<dyn PersistenceStore>) -> Self {
        Self {
            persist_enabled: config.persist,
            balance_key: config.save_key.clone(),
            earned_key: format!("{}{}", config.save_key, TOTAL_EARNED_SUFFIX),
            spent_key: format!("{}{}", config.save_key, TOTAL_SPENT_SUFFIX),
            store,
            balance: 0,
            total_earned: 0,
            total_spent: 0,
            observers: LedgerObservers::default(),
        }
    }

    /// A ledger that never touches disk.
    pub fn in_memory() -> Self {
        Self::new(
            &LedgerConfig {
                persist: false,
                ..LedgerConfig::default()
            },
            Box::new(MemoryStore::new()),
        )
    }

    /// Restores the three persisted values, defaulting to 0 when absent.
    pub fn load(&mut self) {
        if !self.persist_enabled {
            return;
        }
        self.balance = self.store.get_int(&self.balance_key, 0).max(0);
        self.total_earned = self.store.get_int(&self.earned_key, 0).max(0);
        self.total_spent = self.store.get_int(&self.spent_key, 0).max(0);
        debug!(stats = %self.stats(), "gold ledger loaded");
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn total_earned(&self) -> i64 {
        self.total_earned
    }

    pub fn total_spent(&self) -> i64 {
        self.total_spent
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            balance: self.balance,
            total_earned: self.total_earned,
            total_spent: self.total_spent,
        }
    }

    pub fn has_enough(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    pub fn add(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        self.balance = self.balance.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
        debug!(amount, balance = self.balance, "gold added");

        self.persist();
        self.observers.balance_changed.emit(&self.balance);
        self.observers.added.emit(&amount);
    }

    /// Debits `amount`. Returns false, leaving state untouched, when the
    /// amount is not positive or exceeds the balance.
    pub fn spend(&mut self, amount: i64) -> bool {
        if amount <= 0 || self.balance < amount {
            return false;
        }
        self.balance -= amount;
        self.total_spent = self.total_spent.saturating_add(amount);
        debug!(amount, balance = self.balance, "gold spent");

        self.persist();
        self.observers.balance_changed.emit(&self.balance);
        self.observers.spent.emit(&amount);
        true
    }

    pub fn set(&mut self, amount: i64) {
        self.balance = amount.max(0);
        self.persist();
        self.observers.balance_changed.emit(&self.balance);
    }

    pub fn reset(&mut self) {
        self.balance = 0;
        self.total_earned = 0;
        self.total_spent = 0;
        self.persist();
        self.observers.balance_changed.emit(&self.balance);
    }

    fn persist(&mut self) {
        if !self.persist_enabled {
            return;
        }
        self.store.set_int(&self.balance_key, self.balance);
        self.store.set_int(&self.earned_key, self.total_earned);
        self.store.set_int(&self.spent_key, self.total_spent);
        if let Err(e) = self.store.flush() {
            warn!(error = %e, "failed to persist gold ledger");
        }
    }
}
