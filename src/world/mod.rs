//! Terrain, entities and their procedural generation

pub mod entity;
pub mod generation;
pub mod tile;

pub use entity::{Entity, Player};
pub use generation::{generate_entities, generate_layout, generate_world, HouseFootprint, WorldLayout};
pub use tile::{Tile, TileGrid};
