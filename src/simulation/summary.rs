//! Serializable snapshot of the world for runners and logs

use std::fmt;

use serde::Serialize;

use crate::core::types::{Cell, EntityKind, Tick};
use crate::ecs::world::World;
use crate::render::camera::LevelOfDetail;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub tick: Tick,
    pub seed: u64,
    pub player_cell: Cell,
    pub player_alive: bool,
    pub stamina: u32,
    pub max_stamina: u32,
    pub humans: usize,
    pub pursuers: usize,
    /// Pursuers within the detection radius of the player
    pub pursuers_nearby: usize,
    pub occupied_cells: usize,
    pub danger_cells: usize,
    pub pending_destination: Option<Cell>,
    pub preview_len: usize,
    pub density_view: bool,
}

impl WorldSummary {
    pub fn capture(world: &World) -> Self {
        let player = world.player();
        let radius = world.config().agents.detection_radius;
        let stamina = world.stamina();

        let mut humans = 0;
        let mut pursuers = 0;
        let mut pursuers_nearby = 0;
        for agent in world.agents() {
            match agent.kind {
                EntityKind::Human => humans += 1,
                EntityKind::Pursuer => {
                    pursuers += 1;
                    if agent.cell.chebyshev(&player.cell) <= radius {
                        pursuers_nearby += 1;
                    }
                }
                EntityKind::Player => {}
            }
        }

        Self {
            tick: world.current_tick,
            seed: world.config().world.seed,
            player_cell: player.cell,
            player_alive: player.alive,
            stamina: stamina.current,
            max_stamina: stamina.max,
            humans,
            pursuers,
            pursuers_nearby,
            occupied_cells: world.occupancy().len(),
            danger_cells: world.danger().len(),
            pending_destination: world.pending().map(|pending| pending.destination),
            preview_len: world.preview().len(),
            density_view: world.level_of_detail() == LevelOfDetail::Density,
        }
    }
}

impl fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.player_alive { "alive" } else { "dead" };
        write!(
            f,
            "tick {} | player {} ({}) | stamina {}/{} | {} pursuers ({} nearby), {} humans",
            self.tick,
            self.player_cell,
            state,
            self.stamina,
            self.max_stamina,
            self.pursuers,
            self.pursuers_nearby,
            self.humans
        )?;
        if let Some(destination) = self.pending_destination {
            write!(f, " | moving to {}", destination)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::EntityId;
    use crate::world::entity::Entity;
    use crate::world::tile::TileGrid;

    #[test]
    fn test_capture_counts() {
        let entities = vec![
            Entity::new(EntityId(0), Cell::new(50, 50), EntityKind::Player),
            Entity::new(EntityId(1), Cell::new(55, 45), EntityKind::Pursuer),
            Entity::new(EntityId(2), Cell::new(5, 5), EntityKind::Pursuer),
            Entity::new(EntityId(3), Cell::new(60, 60), EntityKind::Human),
        ];
        let world =
            World::from_parts(SimulationConfig::default(), TileGrid::square(100), entities)
                .unwrap();

        let summary = WorldSummary::capture(&world);
        assert_eq!(summary.pursuers, 2);
        assert_eq!(summary.pursuers_nearby, 1);
        assert_eq!(summary.humans, 1);
        assert_eq!(summary.occupied_cells, 4);
        assert!(summary.player_alive);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"player_cell\":{\"x\":50,\"y\":50}"));
        assert!(summary.to_string().starts_with("tick 0 | player (50, 50) (alive)"));
    }
}
