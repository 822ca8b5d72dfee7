//! Simulation report generation.

use serde::Serialize;

/// Outcome of one simulated session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub completed: bool,
    pub seconds: f64,
    pub clicks: u64,
    pub crits: u64,
    pub kills: u64,
    pub upgrades: u32,
    pub gold_earned: i64,
    pub final_damage: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Completed sessions only
    pub avg_seconds: f64,
    pub min_seconds: f64,
    pub max_seconds: f64,
    pub avg_clicks: f64,

    pub avg_upgrades: f64,
    pub avg_gold_earned: f64,
    pub avg_final_damage: f64,
    pub observed_crit_rate: f64,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u64), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.completed).count() as u32;
        let completed = || runs.iter().filter(|r| r.completed);

        let min_seconds = completed().map(|r| r.seconds).fold(f64::INFINITY, f64::min);
        let max_seconds = completed().map(|r| r.seconds).fold(0.0, f64::max);

        let total_clicks: u64 = runs.iter().map(|r| r.clicks).sum();
        let total_crits: u64 = runs.iter().map(|r| r.crits).sum();
        let observed_crit_rate = if total_clicks == 0 {
            0.0
        } else {
            total_crits as f64 / total_clicks as f64
        };

        Self {
            num_runs,
            runs_completed,
            runs_timed_out: num_runs - runs_completed,
            avg_seconds: mean(completed().map(|r| r.seconds)),
            min_seconds: if min_seconds.is_finite() { min_seconds } else { 0.0 },
            max_seconds,
            avg_clicks: mean(completed().map(|r| r.clicks as f64)),
            avg_upgrades: mean(runs.iter().map(|r| r.upgrades as f64)),
            avg_gold_earned: mean(runs.iter().map(|r| r.gold_earned as f64)),
            avg_final_damage: mean(runs.iter().map(|r| r.final_damage)),
            observed_crit_rate,
            run_stats: runs,
        }
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══ Session Summary ═══\n");
        out.push_str(&format!(
            "Runs:            {} ({} completed, {} timed out)\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));
        out.push_str(&format!(
            "Session time:    avg {:.1}s  (min {:.1}s, max {:.1}s)\n",
            self.avg_seconds, self.min_seconds, self.max_seconds
        ));
        out.push_str(&format!("Clicks to clear: {:.1}\n", self.avg_clicks));
        out.push_str(&format!("Upgrades bought: {:.2}\n", self.avg_upgrades));
        out.push_str(&format!("Gold earned:     {:.1}\n", self.avg_gold_earned));
        out.push_str(&format!("Final damage:    {:.1}\n", self.avg_final_damage));
        out.push_str(&format!(
            "Crit rate:       {:.2}%\n",
            self.observed_crit_rate * 100.0
        ));
        out
    }

    /// JSON export (aggregates plus every run).
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
