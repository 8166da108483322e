//! Cell occupancy and the derived danger set
//!
//! Occupancy is updated incrementally on every successful move. The danger
//! set is rebuilt once per tick from occupancy plus a one-cell buffer around
//! every pursuer, and is only ever consulted by path planning.

use ahash::{AHashMap, AHashSet};

use crate::core::types::{Cell, EntityId};

/// Which entity stands on which cell; at most one entity per cell
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    cells: AHashMap<Cell, EntityId>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: AHashMap::with_capacity(capacity),
        }
    }

    /// Claim a cell. Returns false, leaving the index untouched, when another
    /// entity already holds it.
    pub fn occupy(&mut self, cell: Cell, entity: EntityId) -> bool {
        match self.cells.get(&cell) {
            Some(&holder) => holder == entity,
            None => {
                self.cells.insert(cell, entity);
                true
            }
        }
    }

    /// Release a cell, returning whoever held it
    pub fn vacate(&mut self, cell: Cell) -> Option<EntityId> {
        self.cells.remove(&cell)
    }

    /// Move an entity between cells. Fails without side effects when the
    /// destination is taken.
    pub fn relocate(&mut self, entity: EntityId, from: Cell, to: Cell) -> bool {
        if from == to {
            return true;
        }
        if self.cells.contains_key(&to) {
            return false;
        }
        self.cells.remove(&from);
        self.cells.insert(to, entity);
        true
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn occupant(&self, cell: Cell) -> Option<EntityId> {
        self.cells.get(&cell).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, EntityId)> + '_ {
        self.cells.iter().map(|(&cell, &id)| (cell, id))
    }

    /// Occupied cells plus the 3x3 neighbourhood of every pursuer, clipped
    /// to a `width` x `height` map
    pub fn rebuild_danger(
        &self,
        pursuers: impl IntoIterator<Item = Cell>,
        width: usize,
        height: usize,
    ) -> DangerSet {
        let mut danger = DangerSet::with_capacity(self.cells.len() * 2);
        danger.cells.extend(self.cells.keys().copied());

        for pursuer in pursuers {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let cell = pursuer.offset(dx, dy);
                    if cell.x >= 0
                        && cell.y >= 0
                        && (cell.x as usize) < width
                        && (cell.y as usize) < height
                    {
                        danger.cells.insert(cell);
                    }
                }
            }
        }

        danger
    }
}

/// Cells path planning treats as unsafe. Advisory only: agents ignore it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DangerSet {
    cells: AHashSet<Cell>,
}

impl DangerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: AHashSet::with_capacity(capacity),
        }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert(cell);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}
