//! Terrain tiles

use serde::{Deserialize, Serialize};

use crate::spatial::grid::Grid;

/// One cell of terrain
///
/// Every kind is walkable for the player. Agents may not enter houses,
/// which is what makes them shelters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Grass = 0,
    House = 1,
    Spawn = 2,
    Destination = 3,
}

impl Tile {
    /// Agents never step onto this tile
    pub fn blocks_agents(&self) -> bool {
        matches!(self, Tile::House)
    }

    /// A player standing here cannot be caught
    pub fn is_shelter(&self) -> bool {
        matches!(self, Tile::House)
    }

    /// Path planning only avoids danger, never terrain
    pub fn is_traversable(&self) -> bool {
        match self {
            Tile::Grass | Tile::House | Tile::Spawn | Tile::Destination => true,
        }
    }
}

/// The immutable world terrain
pub type TileGrid = Grid<Tile>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_houses_block_agents() {
        assert!(Tile::House.blocks_agents());
        assert!(!Tile::Grass.blocks_agents());
        assert!(!Tile::Spawn.blocks_agents());
        assert!(!Tile::Destination.blocks_agents());
    }

    #[test]
    fn test_all_tiles_traversable() {
        for tile in [Tile::Grass, Tile::House, Tile::Spawn, Tile::Destination] {
            assert!(tile.is_traversable());
        }
    }

    #[test]
    fn test_default_is_grass() {
        let grid = TileGrid::square(3);
        assert!(grid.as_slice().iter().all(|&t| t == Tile::Grass));
    }
}
