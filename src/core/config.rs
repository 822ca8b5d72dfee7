//! Startup configuration for the engine.
//!
//! Every field has a default, so a partial JSON file is enough to override a
//! few values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use super::constants::*;
use crate::combat::types::{default_templates, MonsterTemplate, Position};

/// How upgrade level maps to current damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    /// `base + level * increase_amount`
    #[default]
    Additive,
    /// `base * (1 + level * increase_multiplier)`
    Multiplicative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub base_damage: f64,
    pub critical_chance: f64,
    pub critical_multiplier: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_damage: DEFAULT_BASE_DAMAGE,
            critical_chance: DEFAULT_CRITICAL_CHANCE,
            critical_multiplier: DEFAULT_CRITICAL_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeConfig {
    pub base_cost: i64,
    pub cost_multiplier: f64,
    pub damage_increase_amount: f64,
    pub damage_increase_multiplier: f64,
    pub scaling_mode: ScalingMode,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            base_cost: DEFAULT_UPGRADE_BASE_COST,
            cost_multiplier: DEFAULT_UPGRADE_COST_MULTIPLIER,
            damage_increase_amount: DEFAULT_DAMAGE_INCREASE_AMOUNT,
            damage_increase_multiplier: DEFAULT_DAMAGE_INCREASE_MULTIPLIER,
            scaling_mode: ScalingMode::Additive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub boss_threshold: u32,
    pub templates: Vec<MonsterTemplate>,
    pub spawn_position: Position,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            boss_threshold: DEFAULT_BOSS_KILL_THRESHOLD,
            templates: default_templates(),
            spawn_position: Position::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub lifetime: f64,
    pub release_grace: f64,
    pub offset_y: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            lifetime: DEFAULT_EFFECT_LIFETIME_SECONDS,
            release_grace: EFFECT_RELEASE_GRACE_SECONDS,
            offset_y: DEFAULT_EFFECT_OFFSET_Y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub persist: bool,
    pub save_key: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            persist: true,
            save_key: DEFAULT_GOLD_SAVE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub volume: f32,
    pub play_click_sounds: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            play_click_sounds: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub combat: CombatConfig,
    pub upgrade: UpgradeConfig,
    pub spawn: SpawnConfig,
    pub effects: EffectConfig,
    pub ledger: LedgerConfig,
    pub audio: AudioConfig,
    pub clear_scene: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            upgrade: UpgradeConfig::default(),
            spawn: SpawnConfig::default(),
            effects: EffectConfig::default(),
            ledger: LedgerConfig::default(),
            audio: AudioConfig::default(),
            clear_scene: DEFAULT_CLEAR_SCENE.to_string(),
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Clamps to [0, 1]; NaN or infinite input falls back to full volume.
pub fn sanitized_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

impl EngineConfig {
    /// Clamps every value into the range the engine's invariants require.
    pub fn sanitized(mut self) -> Self {
        let c = &mut self.combat;
        c.base_damage = finite_or(c.base_damage, DEFAULT_BASE_DAMAGE).max(0.0);
        c.critical_chance = finite_or(c.critical_chance, 0.0).clamp(0.0, 1.0);
        c.critical_multiplier = finite_or(c.critical_multiplier, 1.0).max(1.0);

        let u = &mut self.upgrade;
        u.base_cost = u.base_cost.max(1);
        u.cost_multiplier = finite_or(u.cost_multiplier, DEFAULT_UPGRADE_COST_MULTIPLIER).max(1.0);
        u.damage_increase_amount = finite_or(u.damage_increase_amount, 0.0).max(0.0);
        u.damage_increase_multiplier = finite_or(u.damage_increase_multiplier, 0.0).max(0.0);

        self.spawn.templates = self
            .spawn
            .templates
            .into_iter()
            .map(MonsterTemplate::sanitized)
            .collect();

        let e = &mut self.effects;
        e.lifetime = finite_or(e.lifetime, DEFAULT_EFFECT_LIFETIME_SECONDS)
            .max(MIN_EFFECT_LIFETIME_SECONDS);
        e.release_grace = finite_or(e.release_grace, EFFECT_RELEASE_GRACE_SECONDS).max(0.0);

        self.audio.volume = sanitized_volume(self.audio.volume);
        if self.ledger.save_key.is_empty() {
            self.ledger.save_key = DEFAULT_GOLD_SAVE_KEY.to_string();
        }
        self
    }
}

/// Load a JSON config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> io::Result<EngineConfig> {
    let json = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(config.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = EngineConfig::default();
        assert_eq!(config.combat.base_damage, 10.0);
        assert_eq!(config.combat.critical_chance, 0.2);
        assert_eq!(config.combat.critical_multiplier, 10.0);
        assert_eq!(config.upgrade.base_cost, 100);
        assert_eq!(config.upgrade.cost_multiplier, 1.5);
        assert_eq!(config.upgrade.scaling_mode, ScalingMode::Additive);
        assert_eq!(config.spawn.boss_threshold, 10);
        assert_eq!(config.spawn.templates.len(), 3);
        assert!(config.spawn.templates[BOSS_TEMPLATE_INDEX].is_boss);
        assert_eq!(config.ledger.save_key, "PlayerGold");
        assert_eq!(config.clear_scene, "Clear");
    }

    #[test]
    fn test_sanitized_clamps_values() {
        let mut config = EngineConfig::default();
        config.combat.critical_chance = 4.0;
        config.combat.critical_multiplier = 0.1;
        config.combat.base_damage = -3.0;
        config.upgrade.base_cost = 0;
        config.upgrade.cost_multiplier = 0.5;
        config.effects.lifetime = 0.0;
        config.audio.volume = 2.0;
        config.ledger.save_key = String::new();

        let config = config.sanitized();
        assert_eq!(config.combat.critical_chance, 1.0);
        assert_eq!(config.combat.critical_multiplier, 1.0);
        assert_eq!(config.combat.base_damage, 0.0);
        assert_eq!(config.upgrade.base_cost, 1);
        assert_eq!(config.upgrade.cost_multiplier, 1.0);
        assert_eq!(config.effects.lifetime, MIN_EFFECT_LIFETIME_SECONDS);
        assert_eq!(config.audio.volume, 1.0);
        assert_eq!(config.ledger.save_key, DEFAULT_GOLD_SAVE_KEY);
    }

    #[test]
    fn test_nan_volume_falls_back_to_default() {
        let mut config = EngineConfig::default();
        config.audio.volume = f32::NAN;
        assert_eq!(config.sanitized().audio.volume, 1.0);
        assert_eq!(sanitized_volume(-0.5), 0.0);
        assert_eq!(sanitized_volume(0.25), 0.25);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "combat": { "critical_chance": 0.5 }, "upgrade": { "scaling_mode": "multiplicative" } }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.combat.critical_chance, 0.5);
        assert_eq!(config.combat.base_damage, DEFAULT_BASE_DAMAGE);
        assert_eq!(config.upgrade.scaling_mode, ScalingMode::Multiplicative);
        assert_eq!(config.spawn.boss_threshold, DEFAULT_BOSS_KILL_THRESHOLD);
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!(
            "slime_clicker_config_test_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "spawn": { "boss_threshold": 3 } }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.spawn.boss_threshold, 3);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_config_rejects_bad_json() {
        let path = std::env::temp_dir().join(format!(
            "slime_clicker_bad_config_test_{}.json",
            std::process::id()
        ));
        fs::write(&path, "not json").unwrap();

        let err = load_config(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        fs::remove_file(path).ok();
    }
}
