//! Cross-module checks for combat resolution, spawning and the economy.
//!
//! Uses seeded ChaCha8Rng for deterministic behavior.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slime_clicker::combat::{
    calculate_hit, default_templates, CombatResolver, MonsterInstance, MonsterTemplate,
    Position, SpawnController,
};
use slime_clicker::core::{CombatConfig, EffectConfig, ScalingMode, SpawnConfig, UpgradeConfig};
use slime_clicker::economy::{upgrade_cost, GoldLedger, PurchaseOutcome, UpgradeEconomy};
use slime_clicker::effects::EffectLifecycleManager;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn slime() -> MonsterInstance {
    MonsterInstance::spawn(0, &default_templates()[0], Position::default())
}

#[test]
fn test_hits_clamp_health_at_zero() {
    let mut rng = test_rng();
    for damage in [0.0, 1.0, 33.3, 99.9, 100.0, 250.0] {
        let mut monster = slime();
        let outcome = monster.hit(damage, &mut rng);
        let expected = (100.0_f64 - damage).max(0.0);
        assert_eq!(monster.current_hp, expected, "damage {damage}");
        assert_eq!(outcome.remaining_hp, expected);
        assert_eq!(monster.is_dead(), expected == 0.0);
        assert_eq!(outcome.killed(), expected == 0.0);
    }
}

#[test]
fn test_critical_rate_converges() {
    let mut rng = test_rng();
    let resolver = CombatResolver::new(&CombatConfig::default());
    let crits = (0..10_000)
        .filter(|_| resolver.roll(10.0, &mut rng).critical)
        .count();
    let rate = crits as f64 / 10_000.0;
    assert!((0.18..=0.22).contains(&rate), "rate {rate}");
}

#[test]
fn test_critical_hit_multiplies_damage() {
    let mut rng = test_rng();
    let hit = calculate_hit(10.0, 1.0, 10.0, &mut rng);
    assert!(hit.critical);
    assert_eq!(hit.damage, 100.0);

    let hit = calculate_hit(10.0, 0.0, 10.0, &mut rng);
    assert!(!hit.critical);
    assert_eq!(hit.damage, 10.0);
}

#[test]
fn test_resolver_spawns_effect_only_for_live_target() {
    let mut rng = test_rng();
    let resolver = CombatResolver::new(&CombatConfig {
        critical_chance: 0.0,
        ..CombatConfig::default()
    });
    let mut effects = EffectLifecycleManager::new(&EffectConfig::default());

    let mut monster = MonsterInstance::spawn(
        0,
        &MonsterTemplate::new("Target", 10.0, 1, 1),
        Position::default(),
    );
    let hit = resolver
        .on_player_hit(Some(&mut monster), 10.0, Position::default(), &mut effects, &mut rng)
        .unwrap();
    assert!(hit.outcome.killed());
    assert_eq!(effects.active_count(), 1);

    // Dead and missing targets are both ignored
    assert!(resolver
        .on_player_hit(Some(&mut monster), 10.0, Position::default(), &mut effects, &mut rng)
        .is_none());
    assert!(resolver
        .on_player_hit(None, 10.0, Position::default(), &mut effects, &mut rng)
        .is_none());
    assert_eq!(effects.active_count(), 1);
}

#[test]
fn test_boss_flag_is_one_shot_per_cycle() {
    let mut rng = test_rng();
    let mut spawner = SpawnController::new(&SpawnConfig::default());

    for _ in 0..10 {
        assert_ne!(spawner.next_template_index(&mut rng), 2);
        spawner.on_kill();
    }
    assert_eq!(spawner.next_template_index(&mut rng), 2);
    assert!(spawner.boss_spawned());

    // Still over threshold without a reset: falls back to a normal pick
    assert!(spawner.next_template_index(&mut rng) < 2);
    assert!(!spawner.boss_spawned());
    assert_eq!(spawner.next_template_index(&mut rng), 2);
}

#[test]
fn test_short_template_table_falls_back_to_first() {
    let mut rng = test_rng();
    let mut spawner = SpawnController::new(&SpawnConfig {
        boss_threshold: 0,
        templates: vec![MonsterTemplate::new("Only", 10.0, 1, 1)],
        spawn_position: Position::default(),
    });
    let monster = spawner.try_spawn(&mut rng).unwrap();
    assert_eq!(monster.name, "Only");
    assert!(!monster.is_boss);
}

#[test]
fn test_boss_drop_is_five_times_range() {
    let mut rng = test_rng();
    let boss = MonsterInstance::spawn(2, &default_templates()[2], Position::default());
    for _ in 0..200 {
        let gold = boss.force_drop_gold(&mut rng);
        assert_eq!(gold % 5, 0);
        assert!((50..=150).contains(&gold));
    }
}

#[test]
fn test_ledger_scenario() {
    let mut ledger = GoldLedger::in_memory();
    ledger.add(100);
    assert_eq!(ledger.balance(), 100);
    assert_eq!(ledger.total_earned(), 100);
    assert!(!ledger.spend(150));
    assert_eq!(ledger.balance(), 100);
    assert!(ledger.spend(100));
    assert_eq!(ledger.balance(), 0);
}

#[test]
fn test_upgrade_scenario() {
    let config = UpgradeConfig {
        scaling_mode: ScalingMode::Additive,
        damage_increase_amount: 5.0,
        ..UpgradeConfig::default()
    };
    let mut economy = UpgradeEconomy::new(&config, 10.0);
    let mut ledger = GoldLedger::in_memory();
    ledger.add(100);

    assert_eq!(economy.cost(0), 100);
    assert_eq!(economy.cost(1), 150);
    assert_eq!(
        economy.purchase(&mut ledger),
        PurchaseOutcome::Purchased {
            level: 1,
            cost: 100,
            damage: 15.0
        }
    );
    assert_eq!(economy.level(), 1);
    assert_eq!(economy.current_damage(), 15.0);
}

#[test]
fn test_cost_curve_strictly_increasing_for_defaults() {
    let config = UpgradeConfig::default();
    for level in 0..50 {
        assert!(
            upgrade_cost(config.base_cost, config.cost_multiplier, level + 1)
                > upgrade_cost(config.base_cost, config.cost_multiplier, level)
        );
    }
}
