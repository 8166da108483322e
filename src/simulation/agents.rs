//! Non-player agent movement: pursuit and random wander
//!
//! Agents act one at a time in creation order and see the moves of agents
//! that went before them in the same tick. Every move is a single
//! cardinal step; an illegal move leaves the agent where it is.

use rand::Rng;

use crate::core::types::{Cell, Direction, Zone};
use crate::ecs::world::World;
use crate::spatial::occupancy::OccupancyIndex;
use crate::world::entity::Player;
use crate::world::tile::TileGrid;

/// Per-tick movement tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentStats {
    pub moved: u32,
    /// Wanted to move but the target cell was illegal
    pub blocked: u32,
    /// Chose to stay put
    pub idle: u32,
    /// Pursuers that chased the player this tick
    pub chasing: u32,
}

/// Pursuit is switched on only while the player is alive and outside the
/// safe zone
pub fn pursuit_active(player: &Player, safe_zone: &Zone) -> bool {
    player.alive && !safe_zone.contains(player.cell)
}

/// Within `radius` cells on both axes
pub fn within_detection(agent: Cell, player: Cell, radius: u32) -> bool {
    agent.x.abs_diff(player.x) <= radius && agent.y.abs_diff(player.y) <= radius
}

/// One step towards `player` along the axis with the larger gap; ties go to x
pub fn chase_direction(agent: Cell, player: Cell) -> Option<Direction> {
    let dx = player.x - agent.x;
    let dy = player.y - agent.y;
    if dx == 0 && dy == 0 {
        return None;
    }

    let direction = if dx.abs() >= dy.abs() {
        if dx > 0 {
            Direction::East
        } else {
            Direction::West
        }
    } else if dy > 0 {
        Direction::South
    } else {
        Direction::North
    };
    Some(direction)
}

/// Stay put with probability `idle_chance`, otherwise a uniform cardinal step
pub fn wander_direction(rng: &mut impl Rng, idle_chance: f64) -> Option<Direction> {
    if rng.gen_bool(idle_chance.clamp(0.0, 1.0)) {
        return None;
    }
    Some(Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
}

/// In bounds, not a house and not occupied
pub fn is_open_for_agent(tiles: &TileGrid, occupancy: &OccupancyIndex, cell: Cell) -> bool {
    match tiles.get(cell) {
        Some(tile) => !tile.blocks_agents() && !occupancy.is_occupied(cell),
        None => false,
    }
}

/// Move every non-player agent once
pub fn advance_agents(world: &mut World) -> AgentStats {
    let World {
        agents,
        occupancy,
        rng,
        tiles,
        player,
        config,
        ..
    } = world;

    let chase = pursuit_active(player, &config.world.safe_zone);
    let radius = config.agents.detection_radius;
    let idle_chance = config.agents.idle_chance;
    let mut stats = AgentStats::default();

    for agent in agents.iter_mut() {
        let pursuing =
            chase && agent.kind.is_pursuer() && within_detection(agent.cell, player.cell, radius);

        let direction = if pursuing {
            stats.chasing += 1;
            chase_direction(agent.cell, player.cell)
        } else {
            wander_direction(rng, idle_chance)
        };

        let Some(direction) = direction else {
            stats.idle += 1;
            continue;
        };

        let target = agent.cell.step(direction);
        if is_open_for_agent(tiles, occupancy, target)
            && occupancy.relocate(agent.id, agent.cell, target)
        {
            agent.cell = target;
            stats.moved += 1;
        } else {
            stats.blocked += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{EntityId, EntityKind};
    use crate::world::entity::Entity;
    use crate::world::tile::Tile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_chase_prefers_larger_axis() {
        let agent = Cell::new(10, 10);
        assert_eq!(chase_direction(agent, Cell::new(13, 11)), Some(Direction::East));
        assert_eq!(chase_direction(agent, Cell::new(9, 4)), Some(Direction::North));
        assert_eq!(chase_direction(agent, Cell::new(10, 12)), Some(Direction::South));
        assert_eq!(chase_direction(agent, agent), None);
    }

    #[test]
    fn test_chase_tie_moves_on_x() {
        let agent = Cell::new(10, 10);
        assert_eq!(chase_direction(agent, Cell::new(7, 13)), Some(Direction::West));
    }

    #[test]
    fn test_detection_is_per_axis() {
        let player = Cell::new(50, 50);
        assert!(within_detection(Cell::new(58, 42), player, 8));
        assert!(!within_detection(Cell::new(59, 50), player, 8));
    }

    #[test]
    fn test_pursuit_disabled_in_safe_zone_or_dead() {
        let safe = Zone::new(Cell::new(0, 0), 10);
        let mut player = Player::new(EntityId(0), Cell::new(5, 5));
        assert!(!pursuit_active(&player, &safe));

        player.cell = Cell::new(20, 20);
        assert!(pursuit_active(&player, &safe));

        player.alive = false;
        assert!(!pursuit_active(&player, &safe));
    }

    #[test]
    fn test_wander_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(wander_direction(&mut rng, 1.0), None);
            assert!(wander_direction(&mut rng, 0.0).is_some());
        }
    }

    #[test]
    fn test_houses_and_occupants_block() {
        let mut tiles = TileGrid::square(10);
        tiles.set(Cell::new(3, 3), Tile::House);
        let mut occupancy = OccupancyIndex::new();
        occupancy.occupy(Cell::new(4, 4), EntityId(1));

        assert!(!is_open_for_agent(&tiles, &occupancy, Cell::new(3, 3)));
        assert!(!is_open_for_agent(&tiles, &occupancy, Cell::new(4, 4)));
        assert!(!is_open_for_agent(&tiles, &occupancy, Cell::new(-1, 0)));
        assert!(is_open_for_agent(&tiles, &occupancy, Cell::new(5, 5)));
    }

    #[test]
    fn test_pursuer_closes_in() {
        let mut config = SimulationConfig::default();
        config.world.safe_zone = Zone::new(Cell::new(90, 90), 10);
        config.agents.idle_chance = 1.0;
        let entities = vec![
            Entity::new(EntityId(0), Cell::new(50, 50), EntityKind::Player),
            Entity::new(EntityId(1), Cell::new(54, 52), EntityKind::Pursuer),
            Entity::new(EntityId(2), Cell::new(20, 20), EntityKind::Pursuer),
            Entity::new(EntityId(3), Cell::new(51, 51), EntityKind::Human),
        ];
        let mut world = World::from_parts(config, TileGrid::square(100), entities).unwrap();

        let stats = advance_agents(&mut world);

        assert_eq!(world.agents()[0].cell, Cell::new(53, 52));
        // Out of range pursuer and the human idle
        assert_eq!(world.agents()[1].cell, Cell::new(20, 20));
        assert_eq!(world.agents()[2].cell, Cell::new(51, 51));
        assert_eq!(
            stats,
            AgentStats {
                moved: 1,
                blocked: 0,
                idle: 2,
                chasing: 1
            }
        );
        assert!(world.occupancy().is_occupied(Cell::new(53, 52)));
        assert!(!world.occupancy().is_occupied(Cell::new(54, 52)));
    }

    #[test]
    fn test_blocked_chase_stays_put() {
        let mut config = SimulationConfig::default();
        config.world.safe_zone = Zone::new(Cell::new(90, 90), 10);
        let mut tiles = TileGrid::square(100);
        tiles.set(Cell::new(52, 50), Tile::House);
        let entities = vec![
            Entity::new(EntityId(0), Cell::new(50, 50), EntityKind::Player),
            Entity::new(EntityId(1), Cell::new(53, 50), EntityKind::Pursuer),
        ];
        let mut world = World::from_parts(config, tiles, entities).unwrap();

        let stats = advance_agents(&mut world);
        assert_eq!(world.agents()[0].cell, Cell::new(53, 50));
        assert_eq!(stats.blocked, 1);
    }
}
