//! Simulation configuration.

use crate::core::config::EngineConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Auto-clicker rate
    pub clicks_per_second: f64,

    /// Buy every upgrade as soon as it is affordable
    pub buy_upgrades: bool,

    /// Simulated seconds before a session counts as timed out
    pub max_seconds: f64,

    /// Engine tuning under test (persistence is always off)
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            clicks_per_second: 5.0,
            buy_upgrades: true,
            max_seconds: 3600.0,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}
