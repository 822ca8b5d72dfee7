//! Runs whole sessions headlessly through `ClickerEngine`.
//!
//! Statistics are gathered from the engine's event stream, so the
//! simulator sees exactly what a host would.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::collaborators::Collaborators;
use crate::combat::types::Position;
use crate::core::constants::TICK_INTERVAL_MS;
use crate::core::engine::ClickerEngine;
use crate::core::events::EngineEvent;
use crate::utils::persistence::MemoryStore;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let seed = match config.seed {
            Some(seed) => seed.wrapping_add(run_idx as u64),
            None => rand::random(),
        };

        let stats = simulate_single_run(config, seed);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:.1}s, {} clicks, {} crits, {} upgrades, {} gold",
                run_idx + 1,
                config.num_runs,
                stats.seconds,
                stats.clicks,
                stats.crits,
                stats.upgrades,
                stats.gold_earned
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one session from a fresh ledger until the boss dies or time runs out.
pub fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let mut engine_config = config.engine.clone();
    engine_config.ledger.persist = false;

    let mut engine = ClickerEngine::with_seed(
        engine_config,
        Box::new(MemoryStore::new()),
        Collaborators::none(),
        seed,
    );
    engine.init();

    let dt = TICK_INTERVAL_MS as f64 / 1000.0;
    let clicks_per_tick = config.clicks_per_second.max(0.0) * dt;
    let mut click_budget = 0.0;
    let mut stats = RunStats {
        seed,
        ..RunStats::default()
    };

    while !engine.is_session_complete() && engine.elapsed() < config.max_seconds {
        engine.update(dt);

        click_budget += clicks_per_tick;
        while click_budget >= 1.0 {
            click_budget -= 1.0;
            for event in engine.player_hit(Position::default()) {
                match event {
                    EngineEvent::PlayerHit { critical, .. } => {
                        stats.clicks += 1;
                        if critical {
                            stats.crits += 1;
                        }
                    }
                    EngineEvent::MonsterKilled { .. } => stats.kills += 1,
                    _ => {}
                }
            }
        }

        if config.buy_upgrades {
            while engine.purchase_upgrade().is_purchased() {
                stats.upgrades += 1;
            }
        }
    }

    stats.completed = engine.is_session_complete();
    stats.seconds = engine.elapsed();
    stats.gold_earned = engine.ledger().total_earned();
    stats.final_damage = engine.current_damage();
    stats
}
