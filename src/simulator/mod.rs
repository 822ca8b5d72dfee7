//! Balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of headless sessions with an auto-clicker to measure:
//! - Time and clicks needed to reach and kill the boss
//! - How many upgrades a session affords
//! - Observed critical-hit rate against the configured chance

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
