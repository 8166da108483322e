//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for entities
///
/// Identifiers are handed out in creation order, which is also the order
/// agents are advanced each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Taxicab distance, the step count of a 4-directional path
    pub fn manhattan(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// King-move distance; 1 means "one of the 8 surrounding cells"
    pub fn chebyshev(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// The four orthogonal neighbours, in search expansion order
    pub fn neighbors4(&self) -> [Cell; 4] {
        Direction::ALL.map(|d| self.step(d))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement direction (no diagonals anywhere in the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset, with y growing downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Harmless wanderer
    Human,
    /// Clawbie: wanders, and chases the player when close enough
    Pursuer,
    /// The single controlled entity
    Player,
}

impl EntityKind {
    pub fn is_pursuer(&self) -> bool {
        matches!(self, EntityKind::Pursuer)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Human => "human",
            EntityKind::Pursuer => "pursuer",
            EntityKind::Player => "player",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axis-aligned square region of cells, `origin` inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub origin: Cell,
    pub side: u32,
}

impl Zone {
    pub const fn new(origin: Cell, side: u32) -> Self {
        Self { origin, side }
    }

    /// Square of side `2 * radius + 1` centred on `center`
    pub fn around(center: Cell, radius: u32) -> Self {
        let r = radius as i32;
        Self::new(center.offset(-r, -r), radius * 2 + 1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        let side = self.side as i32;
        cell.x >= self.origin.x
            && cell.x < self.origin.x + side
            && cell.y >= self.origin.y
            && cell.y < self.origin.y + side
    }

    pub fn intersects(&self, other: &Zone) -> bool {
        let (a_side, b_side) = (self.side as i32, other.side as i32);
        self.origin.x < other.origin.x + b_side
            && other.origin.x < self.origin.x + a_side
            && self.origin.y < other.origin.y + b_side
            && other.origin.y < self.origin.y + a_side
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let side = self.side as i32;
        (0..side).flat_map(move |dy| (0..side).map(move |dx| self.origin.offset(dx, dy)))
    }
}
