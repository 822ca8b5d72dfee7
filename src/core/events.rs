//! Change notification and the engine's event stream.
//!
//! `Observers<T>` is an explicit subscribe/unsubscribe registry owned by the
//! component that emits. `EngineEvent` is what a tick or a player action
//! produced, returned to the host so presentation never reaches into core
//! state.

use std::fmt;

use crate::combat::types::Position;

/// Handle returned by `subscribe`; pass it to `unsubscribe` to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

pub struct Observers<T> {
    next_id: u64,
    callbacks: Vec<(SubscriptionToken, Callback<T>)>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_id);
        self.next_id += 1;
        self.callbacks.push((token, Box::new(callback)));
        token
    }

    /// Returns false if the token was not (or no longer) registered.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(t, _)| *t != token);
        self.callbacks.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// A single event produced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MonsterSpawned {
        name: String,
        is_boss: bool,
    },
    PlayerHit {
        damage: f64,
        critical: bool,
        remaining_hp: f64,
    },
    MonsterKilled {
        name: String,
        was_boss: bool,
        kill_count: u32,
    },
    GoldDropped {
        amount: i64,
        position: Position,
    },
    MonsterDespawned {
        name: String,
    },
    UpgradePurchased {
        level: u32,
        cost: i64,
        damage: f64,
    },
    InsufficientFunds {
        cost: i64,
        balance: i64,
    },
    SessionComplete {
        scene: String,
    },
}
