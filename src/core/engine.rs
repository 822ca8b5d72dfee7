//! The composition root that owns every core component.
//!
//! `ClickerEngine` is driven by a host loop: call `init()` once, then
//! `update(dt)` every frame and `player_hit` / `purchase_upgrade` whenever
//! the player acts. Each call returns the events it produced so the host
//! can update presentation without reaching into core state.
//!
//! Ordering within a frame: a player hit resolves completely (damage, death,
//! gold credit, kill count) before the next `update` runs its spawn check.
//! A dead monster stays in place for a short cleanup delay; the next spawn
//! happens on the first `update` after it is removed.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::config::{sanitized_volume, EngineConfig};
use super::constants::MONSTER_CLEANUP_DELAY_SECONDS;
use super::events::EngineEvent;
use super::scheduler::Scheduler;
use crate::collaborators::{AudioPlayer, Collaborators, SceneNavigator, SoundId};
use crate::combat::logic::CombatResolver;
use crate::combat::spawn::{KillOutcome, SpawnController};
use crate::combat::types::{MonsterInstance, Position};
use crate::economy::ledger::GoldLedger;
use crate::economy::upgrade::{PurchaseOutcome, UpgradeEconomy};
use crate::effects::{EffectHandle, EffectKind, EffectLifecycleManager};
use crate::utils::persistence::PersistenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineTask {
    RemoveDeadMonster,
}

impl From<PurchaseOutcome> for EngineEvent {
    fn from(outcome: PurchaseOutcome) -> Self {
        match outcome {
            PurchaseOutcome::Purchased {
                level,
                cost,
                damage,
            } => EngineEvent::UpgradePurchased {
                level,
                cost,
                damage,
            },
            PurchaseOutcome::InsufficientFunds { cost, balance } => {
                EngineEvent::InsufficientFunds { cost, balance }
            }
        }
    }
}

pub struct ClickerEngine {
    ledger: GoldLedger,
    upgrades: UpgradeEconomy,
    spawner: SpawnController,
    resolver: CombatResolver,
    effects: EffectLifecycleManager,
    timers: Scheduler<EngineTask>,
    audio: Option<Box<dyn AudioPlayer>>,
    navigator: Option<Box<dyn SceneNavigator>>,
    clear_scene: String,
    sound_volume: f32,
    play_click_sounds: bool,
    effect_offset_y: f32,
    session_complete: bool,
    rng: StdRng,
}

impl ClickerEngine {
    /// Builds an engine seeded from OS entropy.
    pub fn new(
        config: EngineConfig,
        store: Box<dyn PersistenceStore>,
        collaborators: Collaborators,
    ) -> Self {
        Self::with_rng(config, store, collaborators, StdRng::from_entropy())
    }

    /// Builds an engine with a reproducible random sequence.
    pub fn with_seed(
        config: EngineConfig,
        store: Box<dyn PersistenceStore>,
        collaborators: Collaborators,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, store, collaborators, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: EngineConfig,
        store: Box<dyn PersistenceStore>,
        collaborators: Collaborators,
        rng: StdRng,
    ) -> Self {
        let config = config.sanitized();
        let mut effects = EffectLifecycleManager::new(&config.effects);
        effects.set_renderer(collaborators.renderer);

        Self {
            ledger: GoldLedger::new(&config.ledger, store),
            upgrades: UpgradeEconomy::new(&config.upgrade, config.combat.base_damage),
            spawner: SpawnController::new(&config.spawn),
            resolver: CombatResolver::new(&config.combat),
            effects,
            timers: Scheduler::new(),
            audio: collaborators.audio,
            navigator: collaborators.navigator,
            clear_scene: config.clear_scene,
            sound_volume: config.audio.volume,
            play_click_sounds: config.audio.play_click_sounds,
            effect_offset_y: config.effects.offset_y,
            session_complete: false,
            rng,
        }
    }

    /// Restores saved gold and starts a fresh kill cycle at upgrade level 0.
    pub fn init(&mut self) {
        self.ledger.load();
        self.upgrades.reset();
        self.spawner.reset();
        self.session_complete = false;
        info!(gold = self.ledger.balance(), "engine initialized");
    }

    /// Advances timers by `dt` seconds and runs at most one spawn check.
    pub fn update(&mut self, dt: f64) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        self.timers.advance(dt);
        while let Some(due) = self.timers.pop_due() {
            match due.task {
                EngineTask::RemoveDeadMonster => {
                    if let Some(monster) = self.spawner.release_current() {
                        debug!(name = %monster.name, "dead monster removed");
                        events.push(EngineEvent::MonsterDespawned { name: monster.name });
                    }
                }
            }
        }

        self.effects.update(dt);

        if !self.session_complete {
            if let Some(monster) = self.spawner.try_spawn(&mut self.rng) {
                events.push(EngineEvent::MonsterSpawned {
                    name: monster.name.clone(),
                    is_boss: monster.is_boss,
                });
            }
        }

        events
    }

    /// Resolves one click at `position`. No-op when nothing is alive.
    pub fn player_hit(&mut self, position: Position) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let damage = self.upgrades.current_damage();

        let Some(player_hit) = self.resolver.on_player_hit(
            self.spawner.current_mut(),
            damage,
            position,
            &mut self.effects,
            &mut self.rng,
        ) else {
            return events;
        };

        let sound = if player_hit.hit.critical {
            SoundId::CriticalHit
        } else {
            SoundId::NormalHit
        };
        self.play_sound(sound);

        debug!(
            damage = player_hit.hit.damage,
            critical = player_hit.hit.critical,
            remaining = player_hit.outcome.remaining_hp,
            "player hit"
        );
        events.push(EngineEvent::PlayerHit {
            damage: player_hit.hit.damage,
            critical: player_hit.hit.critical,
            remaining_hp: player_hit.outcome.remaining_hp,
        });

        if let Some(death) = player_hit.outcome.death {
            self.ledger.add(death.gold_dropped);
            events.push(EngineEvent::GoldDropped {
                amount: death.gold_dropped,
                position: death.position,
            });

            let outcome = self.spawner.record_death(death.was_boss);
            events.push(EngineEvent::MonsterKilled {
                name: death.monster_name,
                was_boss: death.was_boss,
                kill_count: self.spawner.kill_count(),
            });
            self.timers
                .schedule(MONSTER_CLEANUP_DELAY_SECONDS, EngineTask::RemoveDeadMonster);

            if outcome == KillOutcome::SessionComplete {
                events.extend(self.complete_session());
            }
        }

        events
    }

    /// Buys one damage upgrade if the ledger can pay for it.
    pub fn purchase_upgrade(&mut self) -> PurchaseOutcome {
        let outcome = self.upgrades.purchase(&mut self.ledger);
        if outcome.is_purchased() {
            self.play_sound(SoundId::Upgrade);
        }
        outcome
    }

    /// Spawns a hit effect on the current monster, raised by the configured
    /// offset. Returns `None` when no monster is alive.
    pub fn trigger_monster_effect(&mut self, critical: bool) -> Option<EffectHandle> {
        let position = self
            .spawner
            .current()
            .filter(|monster| monster.is_alive())?
            .position
            .raised(self.effect_offset_y);
        let kind = if critical {
            EffectKind::CriticalHit
        } else {
            EffectKind::NormalHit
        };
        Some(self.effects.spawn(kind, position))
    }

    pub fn clear_all_effects(&mut self) -> usize {
        self.effects.clear_all()
    }

    pub fn reset_kill_count(&mut self) {
        self.spawner.reset();
    }

    pub fn set_critical_chance(&mut self, chance: f64) {
        self.resolver.set_critical_chance(chance);
    }

    pub fn set_critical_multiplier(&mut self, multiplier: f64) {
        self.resolver.set_critical_multiplier(multiplier);
    }

    pub fn set_base_damage(&mut self, damage: f64) {
        self.upgrades.set_base_damage(damage);
    }

    pub fn set_effect_lifetime(&mut self, lifetime: f64) {
        self.effects.set_lifetime(lifetime);
    }

    pub fn set_effect_offset_y(&mut self, offset: f32) {
        self.effect_offset_y = offset;
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = sanitized_volume(volume);
    }

    pub fn set_play_click_sounds(&mut self, enabled: bool) {
        self.play_click_sounds = enabled;
    }

    pub fn ledger(&self) -> &GoldLedger {
        &self.ledger
    }

    /// Mutable access, e.g. to subscribe observers or grant gold.
    pub fn ledger_mut(&mut self) -> &mut GoldLedger {
        &mut self.ledger
    }

    pub fn upgrades(&self) -> &UpgradeEconomy {
        &self.upgrades
    }

    pub fn upgrades_mut(&mut self) -> &mut UpgradeEconomy {
        &mut self.upgrades
    }

    pub fn spawner(&self) -> &SpawnController {
        &self.spawner
    }

    pub fn resolver(&self) -> &CombatResolver {
        &self.resolver
    }

    pub fn effects(&self) -> &EffectLifecycleManager {
        &self.effects
    }

    pub fn current_monster(&self) -> Option<&MonsterInstance> {
        self.spawner.current()
    }

    pub fn current_damage(&self) -> f64 {
        self.upgrades.current_damage()
    }

    pub fn kill_count(&self) -> u32 {
        self.spawner.kill_count()
    }

    pub fn is_session_complete(&self) -> bool {
        self.session_complete
    }

    pub fn elapsed(&self) -> f64 {
        self.timers.now()
    }

    fn complete_session(&mut self) -> Option<EngineEvent> {
        if self.session_complete {
            return None;
        }
        self.session_complete = true;
        info!(scene = %self.clear_scene, kills = self.spawner.kill_count(), "session complete");
        if let Some(navigator) = self.navigator.as_mut() {
            navigator.load(&self.clear_scene);
        }
        Some(EngineEvent::SessionComplete {
            scene: self.clear_scene.clone(),
        })
    }

    fn play_sound(&mut self, sound: SoundId) {
        if !self.play_click_sounds {
            return;
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.play(sound, self.sound_volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::MonsterTemplate;
    use crate::utils::persistence::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TICK: f64 = 0.1;

    #[derive(Clone, Default)]
    struct RecordingAudio {
        played: Rc<RefCell<Vec<SoundId>>>,
        volumes: Rc<RefCell<Vec<f32>>>,
    }

    impl AudioPlayer for RecordingAudio {
        fn play(&mut self, sound: SoundId, volume: f32) {
            self.played.borrow_mut().push(sound);
            self.volumes.borrow_mut().push(volume);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNavigator {
        loaded: Rc<RefCell<Vec<String>>>,
    }

    impl SceneNavigator for RecordingNavigator {
        fn load(&mut self, scene_name: &str) {
            self.loaded.borrow_mut().push(scene_name.to_string());
        }
    }

    /// One-hit monsters, no crits, boss after two kills.
    fn quick_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.combat.critical_chance = 0.0;
        config.combat.base_damage = 10.0;
        config.spawn.boss_threshold = 2;
        config.spawn.templates = vec![
            MonsterTemplate::new("A", 10.0, 5, 5),
            MonsterTemplate::new("B", 10.0, 5, 5),
            MonsterTemplate::boss("Boss", 10.0, 5, 5),
        ];
        config.ledger.persist = false;
        config
    }

    fn engine(config: EngineConfig, collaborators: Collaborators) -> ClickerEngine {
        let mut engine =
            ClickerEngine::with_seed(config, Box::new(MemoryStore::new()), collaborators, 7);
        engine.init();
        engine
    }

    /// Ticks until the dead monster is removed and a new one spawns.
    fn advance_to_next_spawn(engine: &mut ClickerEngine) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(engine.update(TICK));
            if engine.current_monster().map_or(false, |m| m.is_alive()) {
                break;
            }
        }
        events
    }

    #[test]
    fn test_first_update_spawns() {
        let mut engine = engine(quick_config(), Collaborators::none());
        assert!(engine.current_monster().is_none());
        let events = engine.update(TICK);
        assert!(matches!(events[0], EngineEvent::MonsterSpawned { is_boss: false, .. }));
        assert!(engine.current_monster().is_some());
    }

    #[test]
    fn test_hit_without_monster_is_noop() {
        let mut engine = engine(quick_config(), Collaborators::none());
        assert!(engine.player_hit(Position::default()).is_empty());
        assert_eq!(engine.effects().active_count(), 0);
    }

    #[test]
    fn test_kill_credits_gold_and_counts() {
        let mut engine = engine(quick_config(), Collaborators::none());
        engine.update(TICK);

        let events = engine.player_hit(Position::default());
        assert!(events.contains(&EngineEvent::GoldDropped {
            amount: 5,
            position: Position::default()
        }));
        assert_eq!(engine.ledger().balance(), 5);
        assert_eq!(engine.kill_count(), 1);
    }

    #[test]
    fn test_dead_monster_lingers_before_respawn() {
        let mut engine = engine(quick_config(), Collaborators::none());
        engine.update(TICK);
        engine.player_hit(Position::default());

        engine.update(1.0);
        assert!(engine.current_monster().unwrap().is_dead());
        assert!(engine.player_hit(Position::default()).is_empty());

        let events = engine.update(0.6);
        assert!(matches!(events[0], EngineEvent::MonsterDespawned { .. }));
        assert!(matches!(events[1], EngineEvent::MonsterSpawned { .. }));
        assert!(engine.current_monster().unwrap().is_alive());
    }

    #[test]
    fn test_boss_death_completes_session_once() {
        let navigator = RecordingNavigator::default();
        let loaded = Rc::clone(&navigator.loaded);
        let mut engine = engine(
            quick_config(),
            Collaborators::none().with_navigator(navigator),
        );

        engine.update(TICK);
        for _ in 0..2 {
            engine.player_hit(Position::default());
            advance_to_next_spawn(&mut engine);
        }
        assert!(engine.current_monster().unwrap().is_boss);

        let events = engine.player_hit(Position::default());
        assert!(events.contains(&EngineEvent::SessionComplete {
            scene: "Clear".to_string()
        }));
        assert!(engine.is_session_complete());
        assert_eq!(engine.ledger().balance(), 5 + 5 + 25);
        assert_eq!(engine.kill_count(), 2);

        for _ in 0..50 {
            engine.update(TICK);
            engine.player_hit(Position::default());
        }
        assert!(engine.current_monster().is_none());
        assert_eq!(*loaded.borrow(), vec!["Clear".to_string()]);
    }

    #[test]
    fn test_purchase_upgrade_plays_sound() {
        let audio = RecordingAudio::default();
        let played = Rc::clone(&audio.played);
        let mut engine = engine(quick_config(), Collaborators::none().with_audio(audio));

        assert!(!engine.purchase_upgrade().is_purchased());
        engine.ledger_mut().add(100);
        assert!(engine.purchase_upgrade().is_purchased());
        assert_eq!(engine.current_damage(), 15.0);
        assert_eq!(*played.borrow(), vec![SoundId::Upgrade]);
    }

    #[test]
    fn test_click_sounds_can_be_disabled() {
        let audio = RecordingAudio::default();
        let played = Rc::clone(&audio.played);
        let mut engine = engine(quick_config(), Collaborators::none().with_audio(audio));
        engine.update(TICK);
        engine.player_hit(Position::default());
        assert_eq!(*played.borrow(), vec![SoundId::NormalHit]);

        engine.set_play_click_sounds(false);
        advance_to_next_spawn(&mut engine);
        engine.player_hit(Position::default());
        assert_eq!(played.borrow().len(), 1);
    }

    #[test]
    fn test_monster_effect_uses_offset() {
        let mut engine = engine(quick_config(), Collaborators::none());
        assert!(engine.trigger_monster_effect(false).is_none());

        engine.update(TICK);
        engine.set_effect_offset_y(2.0);
        let handle = engine.trigger_monster_effect(true).unwrap();
        assert!(handle.critical);
        assert_eq!(handle.position.y, 2.0);
    }

    #[test]
    fn test_clear_all_effects() {
        let mut engine = engine(quick_config(), Collaborators::none());
        engine.update(TICK);
        engine.trigger_monster_effect(false);
        engine.trigger_monster_effect(true);
        assert_eq!(engine.clear_all_effects(), 2);
        assert_eq!(engine.effects().active_count(), 0);
    }

    #[test]
    fn test_init_restores_gold_and_resets_upgrades() {
        let mut config = quick_config();
        config.ledger.persist = true;
        let mut store = MemoryStore::new();
        store.set_int("PlayerGold", 300);

        let mut engine = ClickerEngine::with_seed(config, Box::new(store), Collaborators::none(), 1);
        engine.init();
        assert_eq!(engine.ledger().balance(), 300);
        assert_eq!(engine.upgrades().level(), 0);
        assert_eq!(engine.current_damage(), 10.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut engine = engine(quick_config(), Collaborators::none());
        engine.set_critical_chance(3.0);
        engine.set_critical_multiplier(0.0);
        engine.set_base_damage(-1.0);
        assert_eq!(engine.resolver().critical_chance(), 1.0);
        assert_eq!(engine.resolver().critical_multiplier(), 1.0);
        assert_eq!(engine.current_damage(), 0.0);
    }

    #[test]
    fn test_nan_volume_is_replaced() {
        let audio = RecordingAudio::default();
        let volumes = Rc::clone(&audio.volumes);
        let mut engine = engine(quick_config(), Collaborators::none().with_audio(audio));
        engine.set_sound_volume(f32::NAN);
        engine.update(TICK);
        engine.player_hit(Position::default());
        assert_eq!(*volumes.borrow(), vec![1.0]);
    }

    #[test]
    fn test_purchase_outcome_converts_to_event() {
        let event: EngineEvent = PurchaseOutcome::InsufficientFunds {
            cost: 100,
            balance: 3,
        }
        .into();
        assert_eq!(
            event,
            EngineEvent::InsufficientFunds {
                cost: 100,
                balance: 3
            }
        );
    }
}
