//! Click-to-damage resolution.
//!
//! Turns a player click into a damage value (with a critical roll), applies
//! it to the current monster and asks the effect manager for hit feedback.

use rand::Rng;

use super::types::{HitOutcome, MonsterInstance, Position};
use crate::core::config::CombatConfig;
use crate::effects::{EffectKind, EffectLifecycleManager};

/// Result of a player click calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Damage dealt (after crit multiplier if applicable).
    pub damage: f64,
    /// Whether this hit was a critical hit.
    pub critical: bool,
}

/// A fully resolved click: the roll plus what it did to the target.
#[derive(Debug, Clone)]
pub struct PlayerHit {
    pub hit: HitResult,
    pub outcome: HitOutcome,
}

/// Roll for critical hit. Critical iff a uniform draw in [0, 1) is <= `chance`.
pub fn roll_critical(chance: f64, rng: &mut impl Rng) -> bool {
    let roll: f64 = rng.gen();
    roll <= chance
}

/// Calculate click damage with crit roll.
pub fn calculate_hit(
    current_damage: f64,
    critical_chance: f64,
    critical_multiplier: f64,
    rng: &mut impl Rng,
) -> HitResult {
    let critical = roll_critical(critical_chance, rng);
    let damage = if critical {
        current_damage * critical_multiplier
    } else {
        current_damage
    };
    HitResult { damage, critical }
}

#[derive(Debug, Clone)]
pub struct CombatResolver {
    critical_chance: f64,
    critical_multiplier: f64,
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(&CombatConfig::default())
    }
}

impl CombatResolver {
    pub fn new(config: &CombatConfig) -> Self {
        let mut resolver = Self {
            critical_chance: 0.0,
            critical_multiplier: 1.0,
        };
        resolver.set_critical_chance(config.critical_chance);
        resolver.set_critical_multiplier(config.critical_multiplier);
        resolver
    }

    pub fn critical_chance(&self) -> f64 {
        self.critical_chance
    }

    pub fn critical_multiplier(&self) -> f64 {
        self.critical_multiplier
    }

    pub fn set_critical_chance(&mut self, chance: f64) {
        self.critical_chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    }

    pub fn set_critical_multiplier(&mut self, multiplier: f64) {
        self.critical_multiplier = multiplier.max(1.0);
    }

    pub fn roll(&self, current_damage: f64, rng: &mut impl Rng) -> HitResult {
        calculate_hit(
            current_damage,
            self.critical_chance,
            self.critical_multiplier,
            rng,
        )
    }

    /// Resolves one click against `target`.
    ///
    /// Returns `None` without rolling when nothing is alive to hit. Otherwise
    /// the hit effect is requested at `position` before damage is applied.
    pub fn on_player_hit(
        &self,
        target: Option<&mut MonsterInstance>,
        current_damage: f64,
        position: Position,
        effects: &mut EffectLifecycleManager,
        rng: &mut impl Rng,
    ) -> Option<PlayerHit> {
        let target = target.filter(|monster| monster.is_alive())?;

        let hit = self.roll(current_damage, rng);
        let kind = if hit.critical {
            EffectKind::CriticalHit
        } else {
            EffectKind::NormalHit
        };
        effects.spawn(kind, position);

        let outcome = target.hit(hit.damage, rng);
        Some(PlayerHit { hit, outcome })
    }
}
