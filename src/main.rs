//! Clawbie Apocalypse - Entry Point
//!
//! Generates the world, then runs an interactive loop on stdin that stands
//! in for the UI shell: move the cursor, commit or cancel the previewed
//! path, and advance the clock.

use std::io::{self, Write};
use std::path::Path;

use clawbie_apocalypse::core::config::{load_config, SimulationConfig};
use clawbie_apocalypse::core::error::Result;
use clawbie_apocalypse::core::types::Cell;
use clawbie_apocalypse::ecs::world::World;
use clawbie_apocalypse::simulation::summary::WorldSummary;
use clawbie_apocalypse::simulation::tick::{run_simulation_tick, SimulationEvent};

const DEFAULT_CONFIG: &str = "data/config/default.toml";

/// Stamina regenerates every this many ticks
const RECHARGE_EVERY: u64 = 2;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clawbie_apocalypse=info".into()),
        )
        .init();

    tracing::info!("Clawbie Apocalypse starting...");

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.into());
    let config = if Path::new(&config_path).exists() {
        load_config(Path::new(&config_path))?
    } else {
        tracing::warn!("{} not found - using built-in defaults", config_path);
        SimulationConfig::default()
    };

    let mut world = World::generate(config)?;

    println!("\n=== CLAWBIE APOCALYPSE ===");
    println!("Reach the destination. Houses are safe; the open field is not.");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick");
    println!("  run <n>         - Run n simulation ticks");
    println!("  cursor <x> <y>  - Point at a cell and preview the path");
    println!("  commit / c      - Commit the previewed path");
    println!("  cancel          - Cancel the pending move");
    println!("  status / s      - Show detailed status");
    println!("  quit / q        - Exit the game");
    println!();

    loop {
        println!("{}", WorldSummary::capture(&world));

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            advance(&mut world);
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&world);
            continue;
        }

        if input == "commit" || input == "c" {
            let outcome = world.commit_preview();
            println!("Commit: {:?}", outcome);
            continue;
        }

        if input == "cancel" {
            if world.cancel() {
                println!("Move cancelled.");
            } else {
                println!("Nothing to cancel.");
            }
            continue;
        }

        if let Some(n) = input.strip_prefix("run ") {
            if let Ok(n) = n.trim().parse::<u32>() {
                println!("Running {} ticks...", n);
                for _ in 0..n {
                    advance(&mut world);
                }
                println!("Completed {} ticks. Now at tick {}.", n, world.current_tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if let Some(args) = input.strip_prefix("cursor ") {
            match parse_cell(args) {
                Some(cell) => {
                    let path = world.on_cursor_moved(cell);
                    match path.last() {
                        Some(end) => println!("Preview: {} steps, ending at {}", path.len(), end),
                        None => println!("No path available."),
                    }
                }
                None => println!("Usage: cursor <x> <y>"),
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, cursor <x> <y>, commit, cancel, status, quit");
    }

    println!(
        "\nGoodbye! Final state: {} ticks elapsed, player {}.",
        world.current_tick,
        if world.player().alive { "alive" } else { "dead" }
    );
    Ok(())
}

/// One tick plus the timer-driven stamina regeneration the UI shell owns
fn advance(world: &mut World) {
    for event in run_simulation_tick(world) {
        match event {
            SimulationEvent::PlayerMoved { from, to, cost } => {
                println!("Moved {} -> {} ({} stamina)", from, to, cost);
            }
            SimulationEvent::PlayerDied { tick, cell } => {
                println!("*** Caught at {} on tick {} ***", cell, tick);
            }
            SimulationEvent::StaminaChanged { .. } | SimulationEvent::AgentsAdvanced { .. } => {}
        }
    }
    if world.current_tick % RECHARGE_EVERY == 0 {
        world.recharge_stamina();
    }
}

fn parse_cell(args: &str) -> Option<Cell> {
    let mut parts = args.split_whitespace().map(str::parse::<i32>);
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    Some(Cell::new(x, y))
}

/// Display detailed status of the player and the threats around them
fn display_detailed_status(world: &World) {
    let summary = WorldSummary::capture(world);
    println!();
    println!("=== Detailed Status (Tick {}) ===", summary.tick);
    println!("  Seed: {}", summary.seed);
    println!(
        "  Player: {} ({})",
        summary.player_cell,
        if summary.player_alive { "alive" } else { "dead" }
    );
    println!("  Stamina: {}/{}", summary.stamina, summary.max_stamina);
    println!(
        "  Population: {} humans, {} pursuers ({} within detection range)",
        summary.humans, summary.pursuers, summary.pursuers_nearby
    );
    println!(
        "  Occupied cells: {}, danger cells: {}",
        summary.occupied_cells, summary.danger_cells
    );
    match summary.pending_destination {
        Some(destination) => println!("  Pending move to {}", destination),
        None => println!("  No pending move (preview {} steps)", summary.preview_len),
    }
    println!();
}
