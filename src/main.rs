//! Headless driver: plays one session with an auto-clicker.
//!
//! Collaborator calls (effects, sounds, scene loads) are logged instead of
//! rendered, so the run doubles as a trace of what a host would receive.

use std::path::Path;
use std::thread;
use std::time::Duration;

use slime_clicker::collaborators::{
    AudioPlayer, Collaborators, EffectPlayer, SceneNavigator, SoundId,
};
use slime_clicker::combat::Position;
use slime_clicker::core::load_config;
use slime_clicker::effects::{EffectId, EffectKind};
use slime_clicker::utils::persistence::{JsonPrefsStore, MemoryStore, PersistenceStore};
use slime_clicker::{ClickerEngine, EngineConfig, EngineEvent, TICK_INTERVAL_MS};
use tracing::{debug, info, warn, Level};

/// Give up after an hour of simulated play.
const MAX_SESSION_SECONDS: f64 = 3600.0;

struct LogEffects;

impl EffectPlayer for LogEffects {
    fn play(&mut self, id: EffectId, kind: EffectKind, position: Position, critical: bool) {
        debug!(?id, ?kind, x = position.x, y = position.y, critical, "effect play");
    }

    fn stop(&mut self, id: EffectId) {
        debug!(?id, "effect stop");
    }

    fn release(&mut self, id: EffectId) {
        debug!(?id, "effect release");
    }
}

struct LogAudio;

impl AudioPlayer for LogAudio {
    fn play(&mut self, sound: SoundId, volume: f32) {
        debug!(?sound, volume, "sound");
    }
}

struct LogNavigator;

impl SceneNavigator for LogNavigator {
    fn load(&mut self, scene_name: &str) {
        info!(scene = scene_name, "loading scene");
    }
}

struct DriverArgs {
    seed: Option<u64>,
    clicks_per_second: f64,
    config_path: Option<String>,
    save: bool,
    realtime: bool,
    verbose: bool,
}

impl Default for DriverArgs {
    fn default() -> Self {
        Self {
            seed: None,
            clicks_per_second: 5.0,
            config_path: None,
            save: true,
            realtime: false,
            verbose: false,
        }
    }
}

fn parse_args() -> DriverArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = DriverArgs::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                parsed.seed = args.get(i).and_then(|s| s.parse().ok());
            }
            "--cps" => {
                i += 1;
                parsed.clicks_per_second =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or(5.0);
            }
            "--config" => {
                i += 1;
                parsed.config_path = args.get(i).cloned();
            }
            "--no-save" => parsed.save = false,
            "--realtime" => parsed.realtime = true,
            "--verbose" => parsed.verbose = true,
            "--version" | "-V" => {
                println!("slime_clicker {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn print_usage() {
    println!(
        "Slime Clicker - headless session driver\n\
         \n\
         Usage: slime_clicker [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N        RNG seed (default: random)\n\
         \x20 --cps N         Auto-clicker rate in clicks/sec (default: 5)\n\
         \x20 --config FILE   Engine tuning JSON\n\
         \x20 --no-save       Keep gold in memory only\n\
         \x20 --realtime      Sleep between ticks instead of running flat out\n\
         \x20 --verbose       Log every hit, effect and sound\n\
         \x20 --version, -V   Print version\n\
         \x20 --help, -h      Show this help"
    );
}

fn open_store(save: bool) -> Box<dyn PersistenceStore> {
    if !save {
        return Box::new(MemoryStore::new());
    }
    match JsonPrefsStore::open_default() {
        Ok(store) => {
            info!(path = %store.path().display(), "using prefs file");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, "prefs directory unavailable, gold will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() {
    let args = parse_args();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .init();

    let config = match &args.config_path {
        Some(path) => match load_config(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let collaborators = Collaborators::none()
        .with_renderer(LogEffects)
        .with_audio(LogAudio)
        .with_navigator(LogNavigator);
    let store = open_store(args.save);
    let mut engine = match args.seed {
        Some(seed) => ClickerEngine::with_seed(config, store, collaborators, seed),
        None => ClickerEngine::new(config, store, collaborators),
    };
    engine.init();

    let dt = TICK_INTERVAL_MS as f64 / 1000.0;
    let clicks_per_tick = args.clicks_per_second.max(0.0) * dt;
    let mut click_budget = 0.0;

    while !engine.is_session_complete() && engine.elapsed() < MAX_SESSION_SECONDS {
        let mut events = engine.update(dt);

        click_budget += clicks_per_tick;
        while click_budget >= 1.0 {
            click_budget -= 1.0;
            events.extend(engine.player_hit(Position::default()));
        }

        while engine.upgrades().can_afford(engine.ledger()) {
            let outcome = engine.purchase_upgrade();
            events.push(outcome.into());
            if !outcome.is_purchased() {
                break;
            }
        }

        for event in &events {
            log_event(event);
        }

        if args.realtime {
            thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
        }
    }

    if engine.is_session_complete() {
        info!(seconds = engine.elapsed(), "session cleared");
    } else {
        warn!(seconds = engine.elapsed(), "session timed out before the boss fell");
    }
    println!("{}", engine.ledger().stats());
    println!("{}", engine.upgrades().info());
}

fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::MonsterSpawned { name, is_boss } => {
            info!(%name, is_boss, "monster spawned");
        }
        EngineEvent::PlayerHit {
            damage,
            critical,
            remaining_hp,
        } => debug!(damage, critical, remaining_hp, "hit"),
        EngineEvent::MonsterKilled {
            name,
            was_boss,
            kill_count,
        } => info!(%name, was_boss, kill_count, "monster killed"),
        EngineEvent::GoldDropped { amount, .. } => info!(amount, "gold dropped"),
        EngineEvent::MonsterDespawned { name } => debug!(%name, "monster removed"),
        EngineEvent::UpgradePurchased {
            level,
            cost,
            damage,
        } => info!(level, cost, damage, "upgrade bought"),
        EngineEvent::InsufficientFunds { cost, balance } => {
            debug!(cost, balance, "cannot afford upgrade")
        }
        EngineEvent::SessionComplete { scene } => info!(%scene, "session complete"),
    }
}
