//! Clawbie Apocalypse - grid survival simulation core
//!
//! A seeded world generator, an occupancy index, a hybrid path planner, a
//! discrete tick clock and the spatial aggregation a renderer needs. The
//! host drives everything through [`ecs::world::World`] and
//! [`simulation::tick::run_simulation_tick`].

pub mod core;
pub mod ecs;
pub mod pathfinding;
pub mod render;
pub mod simulation;
pub mod spatial;
pub mod world;
