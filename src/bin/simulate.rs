//! Session balance simulator CLI.
//!
//! Run Monte Carlo simulations of whole sessions to analyze pacing.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: 1000 runs at 5 clicks/s
//!   cargo run --bin simulate -- -n 100 -c 3     # 100 runs at 3 clicks/s
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use slime_clicker::core::load_config;
use slime_clicker::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use tracing::{error, Level};

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    tracing_subscriber::fmt()
        .with_max_level(if config.verbosity >= 2 {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_target(false)
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SLIME CLICKER BALANCE SIMULATOR                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Clicks/sec:     {}", config.clicks_per_second);
    println!("  Buy Upgrades:   {}", config.buy_upgrades);
    println!("  Max Seconds:    {}", config.max_seconds);
    println!("  Boss After:     {} kills", config.engine.spawn.boss_threshold);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                error!(error = %e, "failed to write JSON report");
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--cps" => {
                if i + 1 < args.len() {
                    config.clicks_per_second = args[i + 1].parse().unwrap_or(5.0);
                    i += 1;
                }
            }
            "-t" | "--max-seconds" => {
                if i + 1 < args.len() {
                    config.max_seconds = args[i + 1].parse().unwrap_or(3600.0);
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    match load_config(Path::new(&args[i + 1])) {
                        Ok(engine) => config.engine = engine,
                        Err(e) => {
                            eprintln!("Failed to load config {}: {}", args[i + 1], e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--no-upgrades" => {
                config.buy_upgrades = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Slime Clicker Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Number of simulation runs (default: 1000)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -c, --cps <C>           Auto-clicker rate in clicks/sec (default: 5)");
    println!("    -t, --max-seconds <T>   Session timeout in seconds (default: 3600)");
    println!("        --config <FILE>     Engine tuning JSON");
    println!("        --no-upgrades       Never buy damage upgrades");
    println!("        --json              Save JSON report");
    println!("    -v, --verbose           Per-run output and debug logging");
    println!("    -h, --help              Show this help");
}
