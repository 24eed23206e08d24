//! scenario-runner: run a lurker scenario headlessly and stream snapshots.
//!
//! Usage:
//!   scenario-runner run --scenario demos/ambush.json --ticks 600 --seed 7
//!   scenario-runner builtin standoff --ticks 300
//!
//! Prints one JSON snapshot per line on stdout. Logs go to stderr and are
//! filtered with RUST_LOG (default: info).

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use lurker_core::constants::TICK_RATE;
use lurker_sim::scenario::BUILTIN_SCENARIOS;
use lurker_sim::{Scenario, SimConfig, SimulationEngine};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "builtin" => cmd_builtin(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "scenario-runner: headless lurker simulation\n\
         \n\
         Commands:\n\
         \n\
         run       Run a scenario loaded from a JSON file\n\
         \n\
           --scenario <path>  Scenario JSON file\n\
         \n\
         builtin   Run a built-in scenario ({})\n\
         \n\
           <name>             Scenario name\n\
         \n\
         Common options:\n\
         \n\
           --ticks <N>        Ticks to simulate (default: {})\n\
           --seed <S>         RNG seed (default: 42)\n\
           --every <N>        Print every Nth snapshot (default: 1)\n",
        BUILTIN_SCENARIOS.join(", "),
        default_ticks()
    );
}

fn default_ticks() -> u64 {
    10 * TICK_RATE as u64
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Parse a numeric flag, exiting on garbage.
fn parse_number(args: &[String], flag: &str, default: u64) -> u64 {
    match flag_value(args, flag) {
        None => default,
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a non-negative integer, got {raw:?}");
                process::exit(1);
            }
        },
    }
}

struct RunOptions {
    ticks: u64,
    seed: u64,
    every: u64,
}

fn parse_options(args: &[String]) -> RunOptions {
    let every = parse_number(args, "--every", 1);
    if every == 0 {
        eprintln!("Error: --every must be at least 1");
        process::exit(1);
    }
    RunOptions {
        ticks: parse_number(args, "--ticks", default_ticks()),
        seed: parse_number(args, "--seed", SimConfig::default().seed),
        every,
    }
}

// --- Commands ---

fn cmd_run(args: &[String]) {
    let path = match flag_value(args, "--scenario") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --scenario <path> is required");
            process::exit(1);
        }
    };

    let scenario = match Scenario::load(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    simulate(&scenario, &parse_options(args));
}

fn cmd_builtin(args: &[String]) {
    let name = match args.first() {
        Some(n) if !n.starts_with("--") => n.as_str(),
        _ => {
            eprintln!("Error: built-in scenario name is required");
            process::exit(1);
        }
    };

    let scenario = match Scenario::builtin(name) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    simulate(&scenario, &parse_options(&args[1..]));
}

fn simulate(scenario: &Scenario, options: &RunOptions) {
    let config = SimConfig {
        seed: options.seed,
        ..Default::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let mut engine = SimulationEngine::new(config);
    if let Err(e) = engine.load_scenario(scenario) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    info!(
        scenario = %scenario.name,
        ticks = options.ticks,
        seed = options.seed,
        "running"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..options.ticks {
        let snapshot = engine.tick();
        if snapshot.time.tick % options.every != 0 {
            continue;
        }
        let line = match serde_json::to_string(&snapshot) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: failed to serialize snapshot: {e}");
                process::exit(1);
            }
        };
        if writeln!(out, "{line}").is_err() {
            // Downstream closed the pipe.
            return;
        }
    }
    if let Err(e) = out.flush() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let time = engine.time();
    info!(ticks = time.tick, elapsed_secs = time.elapsed_secs, "done");
}
