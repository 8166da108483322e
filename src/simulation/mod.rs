pub mod agents;
pub mod summary;
pub mod tick;
pub mod transaction;

pub use agents::{advance_agents, AgentStats};
pub use summary::WorldSummary;
pub use tick::{is_caught, run_simulation_tick, SimulationEvent};
pub use transaction::{CommitOutcome, PendingMove, Stamina};
