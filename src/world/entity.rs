//! Entities placed on the grid

use serde::{Deserialize, Serialize};

use crate::core::types::{Cell, EntityId, EntityKind};

/// A positioned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub cell: Cell,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, cell: Cell, kind: EntityKind) -> Self {
        Self { id, cell, kind }
    }
}

/// The controlled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub cell: Cell,
    pub alive: bool,
}

impl Player {
    pub fn new(id: EntityId, cell: Cell) -> Self {
        Self {
            id,
            cell,
            alive: true,
        }
    }
}
