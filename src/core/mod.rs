pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, SimulationConfig};
pub use error::{Result, SimError};
pub use types::{Cell, Direction, EntityId, EntityKind, Tick, Zone};
