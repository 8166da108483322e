//! Tick system - orchestrates simulation updates
//!
//! One tick resolves the player's pending move, advances every agent,
//! evaluates the death rule and then refreshes the derived state that path
//! planning and rendering read between ticks. Nothing in here fails: an
//! illegal move or a move by a dead player is simply a no-op.

use serde::Serialize;

use crate::core::types::{Cell, Tick};
use crate::ecs::world::World;
use crate::render::camera::LevelOfDetail;
use crate::simulation::agents::advance_agents;
use crate::world::tile::TileGrid;

/// Events generated during a simulation tick
///
/// Returned by `run_simulation_tick` so the UI shell can update its stamina
/// display and react to the player's death.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// The pending move resolved
    PlayerMoved { from: Cell, to: Cell, cost: u32 },
    /// Stamina changed by `delta` as a result of this tick
    StaminaChanged { delta: i64, remaining: u32 },
    /// Emitted once, on the tick the player is caught
    PlayerDied { tick: Tick, cell: Cell },
    /// Agent movement summary
    AgentsAdvanced { moved: u32, blocked: u32, idle: u32 },
}

/// Run a single simulation tick
///
/// In strict order:
/// 1. Resolve the pending player move (if any and the player is alive)
/// 2. Advance every non-player agent once, in creation order
/// 3. Evaluate the death condition for a living player
/// 4. Rebuild the danger set from post-move positions
/// 5. Refresh the cursor path preview
/// 6. Recompute the density grid when the density view is active
/// 7. Advance the tick counter
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    resolve_pending_move(world, &mut events);

    let stats = advance_agents(world);
    events.push(SimulationEvent::AgentsAdvanced {
        moved: stats.moved,
        blocked: stats.blocked,
        idle: stats.idle,
    });

    check_player_death(world, &mut events);

    world.rebuild_danger();
    world.refresh_preview();
    if world.lod == LevelOfDetail::Density {
        world.refresh_density();
    }

    tracing::debug!(
        "Tick {}: {} moved, {} blocked, {} idle, {} chasing, {} danger cells",
        world.current_tick,
        stats.moved,
        stats.blocked,
        stats.idle,
        stats.chasing,
        world.danger.len()
    );

    world.tick();

    events
}

/// Apply the pending move as one step: vacate, occupy, relocate, pay
///
/// A destination outside the map or held by another entity drops the move
/// without charging for it.
fn resolve_pending_move(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let Some(pending) = world.pending.take() else {
        return;
    };
    if !world.player.alive {
        return;
    }

    let from = world.player.cell;
    let to = pending.destination;
    let player_id = world.player.id;

    if !world.tiles.in_bounds(to) || !world.occupancy.relocate(player_id, from, to) {
        tracing::warn!("Dropping move {} -> {}: destination unavailable", from, to);
        return;
    }

    world.player.cell = to;
    let paid = world.stamina.deduct(pending.cost);

    tracing::debug!("Player moved {} -> {} for {} stamina", from, to, paid);
    events.push(SimulationEvent::PlayerMoved {
        from,
        to,
        cost: pending.cost,
    });
    events.push(SimulationEvent::StaminaChanged {
        delta: -(paid as i64),
        remaining: world.stamina.current,
    });
}

fn check_player_death(world: &mut World, events: &mut Vec<SimulationEvent>) {
    if !world.player.alive {
        return;
    }

    let cell = world.player.cell;
    if !is_caught(&world.tiles, cell, |neighbor| {
        world.kind_at(neighbor).is_some_and(|kind| kind.is_pursuer())
    }) {
        return;
    }

    world.player.alive = false;
    world.pending = None;
    // The dead player no longer holds a cell
    world.occupancy.vacate(cell);

    tracing::info!("Player caught at {} on tick {}", cell, world.current_tick);
    events.push(SimulationEvent::PlayerDied {
        tick: world.current_tick,
        cell,
    });
}

/// Death rule: off a house, with a pursuer on any of the 8 surrounding cells
pub fn is_caught(tiles: &TileGrid, player: Cell, is_pursuer_at: impl Fn(Cell) -> bool) -> bool {
    if tiles.get(player).is_some_and(|tile| tile.is_shelter()) {
        return false;
    }

    for dy in -1..=1 {
        for dx in -1..=1 {
            if (dx, dy) != (0, 0) && is_pursuer_at(player.offset(dx, dy)) {
                return true;
            }
        }
    }
    false
}
