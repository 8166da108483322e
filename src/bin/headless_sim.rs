//! Headless Simulation Runner
//!
//! Generates a world, optionally commits one scripted player move, runs a
//! fixed number of ticks and prints a summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use clawbie_apocalypse::core::config::{load_config, SimulationConfig};
use clawbie_apocalypse::core::types::{Cell, Tick};
use clawbie_apocalypse::ecs::world::World;
use clawbie_apocalypse::simulation::summary::WorldSummary;
use clawbie_apocalypse::simulation::tick::{run_simulation_tick, SimulationEvent};

/// Headless Simulation Runner - deterministic batch runs
#[derive(Parser, Debug)]
#[command(name = "headless_sim")]
#[command(about = "Run the grid simulation without a UI and report the outcome")]
struct Args {
    /// TOML config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Commit a path towards this cell before the first tick
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    move_to: Option<Vec<i32>>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    ticks_run: Tick,
    died_at: Option<Tick>,
    moves_resolved: u32,
    stamina_spent: i64,
    summary: WorldSummary,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clawbie_apocalypse=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }

    let mut world = match World::generate(config) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("World generation failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(target) = args.move_to.as_deref() {
        if let [x, y] = *target {
            world.on_cursor_moved(Cell::new(x, y));
            let outcome = world.commit_preview();
            if args.verbose {
                eprintln!("Scripted move to ({}, {}): {:?}", x, y, outcome);
            }
        }
    }

    let mut died_at = None;
    let mut moves_resolved = 0;
    let mut stamina_spent = 0;

    for _ in 0..args.ticks {
        for event in run_simulation_tick(&mut world) {
            if args.verbose {
                eprintln!("  [{}] {:?}", world.current_tick, event);
            }
            match event {
                SimulationEvent::PlayerMoved { .. } => moves_resolved += 1,
                SimulationEvent::StaminaChanged { delta, .. } => stamina_spent -= delta,
                SimulationEvent::PlayerDied { tick, .. } => died_at = Some(tick),
                SimulationEvent::AgentsAdvanced { .. } => {}
            }
        }
    }

    let result = RunResult {
        ticks_run: world.current_tick,
        died_at,
        moves_resolved,
        stamina_spent,
        summary: WorldSummary::capture(&world),
    };

    if args.format == "json" {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("=== Run Result ===");
        println!("Ticks: {}", result.ticks_run);
        match result.died_at {
            Some(tick) => println!("Player caught on tick {}", tick),
            None => println!("Player survived"),
        }
        println!("Moves resolved: {}", result.moves_resolved);
        println!("Stamina spent: {}", result.stamina_spent);
        println!("{}", result.summary);
    }

    ExitCode::SUCCESS
}
