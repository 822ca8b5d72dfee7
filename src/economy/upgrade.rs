//! Damage upgrades bought with gold.
//!
//! Cost curve: `cost(0) = base`, `cost(level) = round(base * multiplier^level)`
//! with ties rounded to even, bumped where needed so the curve is strictly
//! increasing even for small bases or a multiplier of 1.

use tracing::info;

use super::ledger::GoldLedger;
use crate::core::config::{ScalingMode, UpgradeConfig};
use crate::core::events::Observers;

/// Outcome of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseOutcome {
    Purchased { level: u32, cost: i64, damage: f64 },
    InsufficientFunds { cost: i64, balance: i64 },
}

impl PurchaseOutcome {
    pub fn is_purchased(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

#[derive(Debug, Default)]
pub struct UpgradeObservers {
    pub cost_updated: Observers<i64>,
    pub damage_updated: Observers<f64>,
    pub level_updated: Observers<u32>,
    /// Carries the cost that could not be paid.
    pub insufficient_funds: Observers<i64>,
}

/// Raw curve value before the strictly-increasing adjustment.
fn curve_value(base_cost: i64, cost_multiplier: f64, level: u32) -> i64 {
    if level == 0 {
        return base_cost;
    }
    let raw = base_cost as f64 * cost_multiplier.powi(level.min(i32::MAX as u32) as i32);
    // `as` saturates, so runaway curves cap at i64::MAX
    raw.round_ties_even() as i64
}

/// Cost of buying the upgrade that takes `level` to `level + 1`.
///
/// Strictly increasing until the curve reaches `i64::MAX`; every level from
/// there on costs `i64::MAX`.
pub fn upgrade_cost(base_cost: i64, cost_multiplier: f64, level: u32) -> i64 {
    let mut cost = base_cost;
    for l in 1..=level {
        if cost == i64::MAX {
            break;
        }
        cost = curve_value(base_cost, cost_multiplier, l).max(cost.saturating_add(1));
    }
    cost
}

/// Damage at `level` under the given scaling mode.
pub fn damage_at_level(base_damage: f64, level: u32, config: &UpgradeConfig) -> f64 {
    let level = level as f64;
    let damage = match config.scaling_mode {
        ScalingMode::Additive => base_damage + level * config.damage_increase_amount,
        ScalingMode::Multiplicative => {
            base_damage * (1.0 + level * config.damage_increase_multiplier)
        }
    };
    damage.max(0.0)
}

#[derive(Debug)]
pub struct UpgradeEconomy {
    config: UpgradeConfig,
    level: u32,
    base_damage: f64,
    current_damage: f64,
    pub observers: UpgradeObservers,
}

impl UpgradeEconomy {
    pub fn new(config: &UpgradeConfig, base_damage: f64) -> Self {
        let base_damage = base_damage.max(0.0);
        Self {
            config: config.clone(),
            level: 0,
            base_damage,
            current_damage: damage_at_level(base_damage, 0, config),
            observers: UpgradeObservers::default(),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_damage(&self) -> f64 {
        self.base_damage
    }

    pub fn current_damage(&self) -> f64 {
        self.current_damage
    }

    pub fn scaling_mode(&self) -> ScalingMode {
        self.config.scaling_mode
    }

    pub fn cost(&self, level: u32) -> i64 {
        upgrade_cost(self.config.base_cost, self.config.cost_multiplier, level)
    }

    pub fn next_cost(&self) -> i64 {
        self.cost(self.level)
    }

    pub fn can_afford(&self, ledger: &GoldLedger) -> bool {
        ledger.has_enough(self.next_cost())
    }

    /// Spends the next cost from `ledger` and raises the level by one.
    /// On insufficient funds nothing changes.
    pub fn purchase(&mut self, ledger: &mut GoldLedger) -> PurchaseOutcome {
        let cost = self.next_cost();
        if !ledger.has_enough(cost) || !ledger.spend(cost) {
            self.observers.insufficient_funds.emit(&cost);
            return PurchaseOutcome::InsufficientFunds {
                cost,
                balance: ledger.balance(),
            };
        }

        self.level += 1;
        self.recompute();
        info!(level = self.level, cost, damage = self.current_damage, "upgrade purchased");
        self.publish();

        PurchaseOutcome::Purchased {
            level: self.level,
            cost,
            damage: self.current_damage,
        }
    }

    pub fn set_base_damage(&mut self, value: f64) {
        self.base_damage = value.max(0.0);
        self.recompute();
        self.publish();
    }

    /// Back to level 0 with damage at base.
    pub fn reset(&mut self) {
        self.level = 0;
        self.recompute();
        self.publish();
    }

    /// Re-emits cost, damage and level so subscribers can refresh.
    pub fn publish(&mut self) {
        let cost = self.next_cost();
        self.observers.cost_updated.emit(&cost);
        self.observers.damage_updated.emit(&self.current_damage);
        self.observers.level_updated.emit(&self.level);
    }

    pub fn info(&self) -> String {
        format!(
            "Upgrade level: {}, damage: {:.1}, next cost: {}",
            self.level,
            self.current_damage,
            self.next_cost()
        )
    }

    fn recompute(&mut self) {
        self.current_damage = damage_at_level(self.base_damage, self.level, &self.config);
    }
}
