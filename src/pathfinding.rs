//! Hybrid pathfinding for player move requests
//!
//! A direct staircase route is tried first. When any cell along it is in
//! the danger set, a depth-bounded breadth-first search takes over and, if
//! the target is out of reach, returns the route to the closest cell it
//! found. Queries are read-only.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::types::Cell;
use crate::spatial::occupancy::DangerSet;
use crate::world::tile::TileGrid;

/// Find a path of at most `max_steps` cells from `start` towards `target`
///
/// The returned path excludes `start`. It is empty when `start == target`,
/// when `max_steps` is zero, or when every neighbour of `start` is blocked.
/// The target itself is never considered dangerous, so a move onto a
/// dangerous cell can still be expressed.
pub fn find_path(
    start: Cell,
    target: Cell,
    tiles: &TileGrid,
    danger: &DangerSet,
    max_steps: u32,
) -> Vec<Cell> {
    if start == target || max_steps == 0 {
        return Vec::new();
    }

    let passable = |cell: Cell| -> bool {
        let Some(tile) = tiles.get(cell) else {
            return false;
        };
        tile.is_traversable() && (cell == target || !danger.contains(cell))
    };

    if let Some(path) = staircase_path(start, target, max_steps, passable) {
        return path;
    }

    tracing::trace!(
        "Direct route {} -> {} blocked, falling back to bounded search",
        start,
        target
    );
    bounded_search(start, target, max_steps, passable)
}

/// Number of steps a path costs
pub fn path_cost(path: &[Cell]) -> u32 {
    path.len() as u32
}

/// Walk straight towards `target`, interleaving x and y steps in proportion
/// to the remaining distance on each axis
///
/// Covers at most `min(manhattan, max_steps)` cells. Returns `None` as soon
/// as any cell fails `passable`; there is no partial result.
pub fn staircase_path(
    start: Cell,
    target: Cell,
    max_steps: u32,
    passable: impl Fn(Cell) -> bool,
) -> Option<Vec<Cell>> {
    let adx = start.x.abs_diff(target.x) as u64;
    let ady = start.y.abs_diff(target.y) as u64;
    let total = adx + ady;
    if total == 0 {
        return Some(Vec::new());
    }

    let sign_x = target.x.cmp(&start.x) as i32;
    let sign_y = target.y.cmp(&start.y) as i32;
    let steps = total.min(max_steps as u64) as u32;

    let mut path = Vec::with_capacity(steps as usize);
    let mut current = start;
    let mut steps_x = 0;

    for i in 0..steps {
        if steps_x < rounded_share(adx, i as u64 + 1, total) {
            current.x += sign_x;
            steps_x += 1;
        } else {
            current.y += sign_y;
        }

        if !passable(current) {
            return None;
        }
        path.push(current);
    }

    Some(path)
}

/// `round(part * step / total)` in integers, halves rounding up
#[inline]
fn rounded_share(part: u64, step: u64, total: u64) -> u64 {
    ((2 * part as u128 * step as u128 + total as u128) / (2 * total as u128)) as u64
}

/// Breadth-first search over 4-neighbours, never deeper than `max_steps`
///
/// Returns the shortest path to `target` when it is reachable in budget.
/// Otherwise returns the path to the explored cell (other than `start`)
/// closest to `target` by Manhattan distance, preferring the one discovered
/// first on ties.
pub fn bounded_search(
    start: Cell,
    target: Cell,
    max_steps: u32,
    passable: impl Fn(Cell) -> bool,
) -> Vec<Cell> {
    let mut came_from: AHashMap<Cell, Cell> = AHashMap::new();
    let mut discovered: Vec<Cell> = Vec::new();
    let mut frontier: VecDeque<(Cell, u32)> = VecDeque::new();
    let mut found = false;

    frontier.push_back((start, 0));

    while let Some((current, depth)) = frontier.pop_front() {
        if current == target {
            found = true;
            break;
        }
        if depth >= max_steps {
            continue;
        }

        for neighbor in current.neighbors4() {
            if neighbor == start || came_from.contains_key(&neighbor) {
                continue;
            }
            if !passable(neighbor) {
                continue;
            }
            came_from.insert(neighbor, current);
            discovered.push(neighbor);
            frontier.push_back((neighbor, depth + 1));
        }
    }

    let end = if found {
        target
    } else {
        let mut best: Option<(u64, Cell)> = None;
        for &cell in &discovered {
            let dist = wide_manhattan(cell, target);
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, cell));
            }
        }
        match best {
            Some((_, cell)) => cell,
            None => return Vec::new(),
        }
    };

    reconstruct_path(&came_from, start, end)
}

/// Manhattan distance that cannot overflow for targets far off the map
fn wide_manhattan(a: Cell, b: Cell) -> u64 {
    a.x.abs_diff(b.x) as u64 + a.y.abs_diff(b.y) as u64
}

/// Reconstruct path from came_from map, excluding `start`
fn reconstruct_path(came_from: &AHashMap<Cell, Cell>, start: Cell, end: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        path.push(current);
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }
    path.reverse();
    path
}
