//! Spatial data structures: dense grids and the occupancy/danger index

pub mod grid;
pub mod occupancy;

pub use grid::Grid;
pub use occupancy::{DangerSet, OccupancyIndex};
