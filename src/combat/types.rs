use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::*;

/// A world-space position handed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn raised(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

/// Authored, immutable description of a creature kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub name: String,
    pub max_hp: f64,
    pub min_gold: i64,
    pub max_gold: i64,
    #[serde(default)]
    pub is_boss: bool,
}

impl MonsterTemplate {
    pub fn new(name: &str, max_hp: f64, min_gold: i64, max_gold: i64) -> Self {
        Self {
            name: name.to_string(),
            max_hp,
            min_gold,
            max_gold,
            is_boss: false,
        }
    }

    pub fn boss(name: &str, max_hp: f64, min_gold: i64, max_gold: i64) -> Self {
        Self {
            is_boss: true,
            ..Self::new(name, max_hp, min_gold, max_gold)
        }
    }

    /// Clamps authored values into a usable range: hp > 0, 0 <= min <= max.
    pub fn sanitized(mut self) -> Self {
        if !(self.max_hp > 0.0) {
            self.max_hp = DEFAULT_MONSTER_MAX_HP;
        }
        self.min_gold = self.min_gold.max(0);
        self.max_gold = self.max_gold.max(self.min_gold);
        self
    }
}

/// The default three-slot table: two normal slimes and the boss.
pub fn default_templates() -> Vec<MonsterTemplate> {
    vec![
        MonsterTemplate::new("Green Slime", DEFAULT_MONSTER_MAX_HP, DEFAULT_MIN_GOLD, DEFAULT_MAX_GOLD),
        MonsterTemplate::new("Blue Slime", DEFAULT_MONSTER_MAX_HP, DEFAULT_MIN_GOLD, DEFAULT_MAX_GOLD),
        MonsterTemplate::boss("King Slime", DEFAULT_BOSS_MAX_HP, DEFAULT_MIN_GOLD, DEFAULT_MAX_GOLD),
    ]
}

/// Emitted exactly once when a monster dies.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathReport {
    pub monster_name: String,
    pub gold_dropped: i64,
    pub was_boss: bool,
    pub position: Position,
}

/// What a single `hit` did to the monster.
#[derive(Debug, Clone, PartialEq)]
pub struct HitOutcome {
    pub damage_applied: f64,
    pub remaining_hp: f64,
    pub death: Option<DeathReport>,
}

impl HitOutcome {
    fn ignored(remaining_hp: f64) -> Self {
        Self {
            damage_applied: 0.0,
            remaining_hp,
            death: None,
        }
    }

    pub fn killed(&self) -> bool {
        self.death.is_some()
    }
}

/// One live creature spawned from a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterInstance {
    pub name: String,
    pub template_index: usize,
    pub max_hp: f64,
    pub current_hp: f64,
    pub min_gold: i64,
    pub max_gold: i64,
    pub is_boss: bool,
    pub position: Position,
    is_dead: bool,
}

impl MonsterInstance {
    pub fn spawn(template_index: usize, template: &MonsterTemplate, position: Position) -> Self {
        Self {
            name: template.name.clone(),
            template_index,
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            min_gold: template.min_gold,
            max_gold: template.max_gold,
            is_boss: template.is_boss,
            position,
            is_dead: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Applies damage. Dead monsters ignore hits; negative damage counts as 0.
    pub fn hit(&mut self, damage: f64, rng: &mut impl Rng) -> HitOutcome {
        if self.is_dead {
            return HitOutcome::ignored(self.current_hp);
        }

        let damage = damage.max(0.0);
        self.current_hp -= damage;

        if self.current_hp > 0.0 {
            return HitOutcome {
                damage_applied: damage,
                remaining_hp: self.current_hp,
                death: None,
            };
        }

        self.current_hp = 0.0;
        self.is_dead = true;
        let gold_dropped = self.roll_gold_drop(rng);

        HitOutcome {
            damage_applied: damage,
            remaining_hp: 0.0,
            death: Some(DeathReport {
                monster_name: self.name.clone(),
                gold_dropped,
                was_boss: self.is_boss,
                position: self.position,
            }),
        }
    }

    pub fn heal(&mut self, amount: f64) {
        if self.is_dead {
            return;
        }
        self.current_hp = (self.current_hp + amount.max(0.0)).min(self.max_hp);
    }

    pub fn set_max_hp(&mut self, max_hp: f64) {
        self.max_hp = max_hp.max(0.0);
        self.current_hp = self.current_hp.min(self.max_hp);
    }

    pub fn set_gold_drop_range(&mut self, min: i64, max: i64) {
        self.min_gold = min.max(0);
        self.max_gold = max.max(self.min_gold);
    }

    /// Uniform integer in `[min_gold, max_gold]`, times the boss multiplier.
    /// Saturates at `i64::MAX`.
    pub fn roll_gold_drop(&self, rng: &mut impl Rng) -> i64 {
        let multiplier = if self.is_boss { BOSS_GOLD_MULTIPLIER } else { 1 };
        rng.gen_range(self.min_gold..=self.max_gold)
            .saturating_mul(multiplier)
    }

    /// Samples a drop without killing the monster.
    pub fn force_drop_gold(&self, rng: &mut impl Rng) -> i64 {
        self.roll_gold_drop(rng)
    }

    pub fn display_name(&self) -> String {
        if self.is_dead {
            format!("{} (Dead)", self.name)
        } else {
            self.name.clone()
        }
    }

    pub fn gold_drop_info(&self) -> String {
        let suffix = if self.is_boss {
            format!(" x{} (boss)", BOSS_GOLD_MULTIPLIER)
        } else {
            String::new()
        };
        format!("Gold drop: {} ~ {}{}", self.min_gold, self.max_gold, suffix)
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.current_hp / self.max_hp).clamp(0.0, 1.0)
        }
    }
}
