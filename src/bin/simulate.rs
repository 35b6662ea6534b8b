//! Offline-estimate simulator CLI.
//!
//! Plays the live engine headlessly and compares it with the offline
//! reward estimate for the same span.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # 600s at 16ms frames
//!   cargo run --bin simulate -- --seconds 3600    # One hour of play
//!   cargo run --bin simulate -- --seed 42 --json  # Reproducible, JSON output

use autobattle::content::Catalog;
use autobattle::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = parse_args(&args);

    if !json {
        println!("Configuration:");
        println!("  Runs:      {}", config.num_runs);
        println!("  Seconds:   {}", config.seconds);
        println!("  Frame:     {}ms", config.effective_frame_ms());
        if let Some(seed) = config.seed {
            println!("  Seed:      {}", seed);
        }
        println!();
    }

    let report = run_simulation(&config, &Catalog::builtin());

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--seconds" => {
                if i + 1 < args.len() {
                    config.seconds = args[i + 1].parse().unwrap_or(600);
                    i += 1;
                }
            }
            "--frame-ms" => {
                if i + 1 < args.len() {
                    config.frame_ms = args[i + 1].parse().unwrap_or(16.0);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                log::warn!("Ignoring unknown argument {}", other);
            }
        }
        i += 1;
    }

    (config, json)
}

fn print_help() {
    println!("Autobattle Offline Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>       Number of runs to average (default: 1)");
    println!("    --seconds <S>        Simulated seconds per run (default: 600)");
    println!("    --frame-ms <MS>      Real time per advance() call (default: 16)");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    --json               Print the report as JSON");
    println!("    -h, --help           Show this help");
}
