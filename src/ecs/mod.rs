//! Simulation context

pub mod world;

pub use world::World;
