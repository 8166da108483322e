//! Procedural world generation
//!
//! Terrain and entity placement are pure functions of their inputs: the same
//! seed always yields the same grid and the same entity list. All randomness
//! comes from seeded `ChaCha8Rng` streams.

use ahash::AHashSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::{SimulationConfig, WorldGenConfig};
use crate::core::error::{Result, SimError};
use crate::core::types::{Cell, EntityId, EntityKind, Zone};
use crate::world::entity::Entity;
use crate::world::tile::{Tile, TileGrid};

/// Entity placement draws from a separate stream so tweaking entity counts
/// never reshuffles terrain.
pub const ENTITY_SEED_OFFSET: u64 = 999;

/// Square footprint of one placed house cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseFootprint {
    pub zone: Zone,
}

impl HouseFootprint {
    pub fn new(origin: Cell, side: u32) -> Self {
        Self {
            zone: Zone::new(origin, side),
        }
    }

    /// Centre in doubled coordinates, which keeps odd sides integral
    fn doubled_center(&self) -> (i64, i64) {
        let side = self.zone.side as i64;
        (
            2 * self.zone.origin.x as i64 + side,
            2 * self.zone.origin.y as i64 + side,
        )
    }

    fn doubled_distance_sq(&self, other: &Self) -> i64 {
        let (ax, ay) = self.doubled_center();
        let (bx, by) = other.doubled_center();
        (ax - bx).pow(2) + (ay - by).pow(2)
    }

    /// Euclidean distance between the two centres
    pub fn center_distance(&self, other: &Self) -> f64 {
        (self.doubled_distance_sq(other) as f64).sqrt() / 2.0
    }
}

/// Generated terrain together with the house footprints that shaped it
#[derive(Debug, Clone)]
pub struct WorldLayout {
    pub tiles: TileGrid,
    pub houses: Vec<HouseFootprint>,
}

/// Generate the tile grid for a seed
pub fn generate_world(seed: u64, config: &WorldGenConfig) -> Result<TileGrid> {
    generate_layout(seed, config).map(|layout| layout.tiles)
}

/// Generate the tile grid and keep the house footprints
///
/// Fails with [`SimError::InvalidConfig`] when the world or house footprint
/// is unusable, and with [`SimError::GenerationFailed`] when the houses
/// cannot be placed within `max_placement_attempts` draws.
pub fn generate_layout(seed: u64, config: &WorldGenConfig) -> Result<WorldLayout> {
    let max_origin = house_origin_limit(config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut tiles = TileGrid::square(config.size as usize);

    tiles.set(config.destination, Tile::Destination);
    tiles.set(config.spawn, Tile::Spawn);

    let houses = place_houses(config, max_origin, &mut rng)?;
    for house in &houses {
        for cell in house.zone.cells() {
            tiles.set(cell, Tile::House);
        }
    }

    tracing::info!(
        "Generated {}x{} world from seed {} with {} houses",
        config.size,
        config.size,
        seed,
        houses.len()
    );

    Ok(WorldLayout { tiles, houses })
}

/// Largest origin coordinate at which a house still fits on the map
fn house_origin_limit(config: &WorldGenConfig) -> Result<i32> {
    let limit = config
        .size
        .checked_sub(config.house_size)
        .filter(|_| config.size > 0)
        .and_then(|limit| i32::try_from(limit).ok());

    limit.ok_or_else(|| {
        SimError::InvalidConfig(format!(
            "house_size {} does not fit a {}x{} world",
            config.house_size, config.size, config.size
        ))
    })
}

fn place_houses(
    config: &WorldGenConfig,
    max_origin: i32,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<HouseFootprint>> {
    let side = config.house_size;
    let destination_clearance = Zone::around(config.destination, config.destination_margin);
    let min_spacing_sq = (2 * config.min_house_spacing as i64).pow(2);

    let mut houses: Vec<HouseFootprint> = Vec::with_capacity(config.house_count as usize);
    let mut attempts = 0;

    while houses.len() < config.house_count as usize {
        if attempts >= config.max_placement_attempts {
            tracing::warn!(
                "House placement gave up after {} attempts ({} of {} placed)",
                attempts,
                houses.len(),
                config.house_count
            );
            return Err(SimError::GenerationFailed {
                placed: houses.len() as u32,
                required: config.house_count,
                attempts,
            });
        }
        attempts += 1;

        let origin = Cell::new(rng.gen_range(0..=max_origin), rng.gen_range(0..=max_origin));
        let candidate = HouseFootprint::new(origin, side);

        if candidate.zone.intersects(&config.safe_zone)
            || candidate.zone.intersects(&destination_clearance)
        {
            continue;
        }

        if houses
            .iter()
            .any(|house| house.doubled_distance_sq(&candidate) < min_spacing_sq)
        {
            continue;
        }

        houses.push(candidate);
    }

    Ok(houses)
}

/// Generate the initial entity population for a world
///
/// The player comes first (id 0), then the humans clustered in the spawn
/// corner, then the pursuers scattered over the rest of the map. No two
/// entities share a cell and nobody starts on a house.
pub fn generate_entities(
    seed: u64,
    tiles: &TileGrid,
    config: &SimulationConfig,
) -> Result<Vec<Entity>> {
    let size = match i32::try_from(config.world.size) {
        Ok(size) if size > 0 => size,
        _ => {
            return Err(SimError::InvalidConfig(format!(
                "world.size {} cannot hold entities",
                config.world.size
            )))
        }
    };

    let spawn = &config.spawn;
    let mut scatter = Scatter {
        rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(ENTITY_SEED_OFFSET)),
        tiles,
        taken: AHashSet::new(),
        entities: Vec::with_capacity((1 + spawn.human_count + spawn.pursuer_count) as usize),
        max_attempts_per_entity: spawn.max_attempts_per_entity,
    };

    if !scatter.is_free(spawn.player_start) {
        return Err(SimError::InvalidConfig(format!(
            "player start {} is not a free walkable cell",
            spawn.player_start
        )));
    }
    scatter.push(spawn.player_start, EntityKind::Player);

    let human_zone = spawn.human_zone;
    scatter.place(
        EntityKind::Human,
        spawn.human_count,
        |rng| {
            let side = human_zone.side.max(1) as i32;
            human_zone
                .origin
                .offset(rng.gen_range(0..side), rng.gen_range(0..side))
        },
        |_| true,
    )?;

    let safe_zone = config.world.safe_zone;
    scatter.place(
        EntityKind::Pursuer,
        spawn.pursuer_count,
        |rng| Cell::new(rng.gen_range(0..size), rng.gen_range(0..size)),
        |cell| !safe_zone.contains(cell),
    )?;

    tracing::info!(
        "Spawned player, {} humans and {} pursuers",
        spawn.human_count,
        spawn.pursuer_count
    );

    Ok(scatter.entities)
}

/// Rejection sampler for entity placement
struct Scatter<'a> {
    rng: ChaCha8Rng,
    tiles: &'a TileGrid,
    taken: AHashSet<Cell>,
    entities: Vec<Entity>,
    max_attempts_per_entity: u32,
}

impl Scatter<'_> {
    fn is_free(&self, cell: Cell) -> bool {
        match self.tiles.get(cell) {
            Some(tile) => !tile.blocks_agents() && !self.taken.contains(&cell),
            None => false,
        }
    }

    fn push(&mut self, cell: Cell, kind: EntityKind) {
        let id = EntityId(self.entities.len() as u32);
        self.taken.insert(cell);
        self.entities.push(Entity::new(id, cell, kind));
    }

    fn place(
        &mut self,
        kind: EntityKind,
        count: u32,
        mut draw: impl FnMut(&mut ChaCha8Rng) -> Cell,
        allowed: impl Fn(Cell) -> bool,
    ) -> Result<()> {
        let budget = count as u64 * self.max_attempts_per_entity as u64;
        let mut attempts = 0u64;
        let mut placed = 0;

        while placed < count {
            if attempts >= budget {
                return Err(SimError::EntityPlacementFailed {
                    kind,
                    placed,
                    required: count,
                });
            }
            attempts += 1;

            let cell = draw(&mut self.rng);
            if !allowed(cell) || !self.is_free(cell) {
                continue;
            }

            self.push(cell, kind);
            placed += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.world.size = 100;
        config.world.spawn = Cell::new(95, 95);
        config.world.destination = Cell::new(5, 5);
        config.world.safe_zone = Zone::new(Cell::new(90, 90), 10);
        config.world.destination_margin = 3;
        config.world.house_count = 10;
        config.world.house_size = 3;
        config.world.min_house_spacing = 8;
        config.spawn.human_zone = Zone::new(Cell::new(90, 90), 10);
        config.spawn.human_count = 10;
        config.spawn.pursuer_count = 50;
        config.spawn.player_start = Cell::new(95, 95);
        config
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = small_config();
        let a = generate_layout(3, &config.world).unwrap();
        let b = generate_layout(3, &config.world).unwrap();
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.houses, b.houses);
    }

    #[test]
    fn test_different_seed_different_layout() {
        let config = small_config();
        let a = generate_layout(3, &config.world).unwrap();
        let b = generate_layout(4, &config.world).unwrap();
        assert_ne!(a.houses, b.houses);
    }

    #[test]
    fn test_markers_placed() {
        let config = small_config();
        let tiles = generate_world(1, &config.world).unwrap();
        assert_eq!(tiles.get(Cell::new(95, 95)), Some(&Tile::Spawn));
        assert_eq!(tiles.get(Cell::new(5, 5)), Some(&Tile::Destination));
    }

    #[test]
    fn test_houses_respect_spacing() {
        let config = small_config();
        let layout = generate_layout(11, &config.world).unwrap();
        assert_eq!(layout.houses.len(), 10);
        for (i, a) in layout.houses.iter().enumerate() {
            for b in &layout.houses[i + 1..] {
                assert!(a.center_distance(b) >= 8.0);
            }
        }
    }

    #[test]
    fn test_impossible_placement_fails_loudly() {
        let mut config = small_config();
        config.world.house_count = 500;
        config.world.min_house_spacing = 30;
        config.world.max_placement_attempts = 2_000;

        let err = generate_layout(1, &config.world).unwrap_err();
        match err {
            SimError::GenerationFailed {
                placed,
                required,
                attempts,
            } => {
                assert!(placed < required);
                assert_eq!(required, 500);
                assert_eq!(attempts, 2_000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_house_is_rejected() {
        let mut config = small_config();
        config.world.size = 10;
        config.world.house_size = 20;

        let err = generate_world(1, &config.world).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_world_is_rejected() {
        let mut config = small_config();
        config.world.size = 0;
        config.world.house_size = 0;
        assert!(matches!(
            generate_layout(1, &config.world),
            Err(SimError::InvalidConfig(_))
        ));

        let tiles = generate_world(9, &small_config().world).unwrap();
        let err = generate_entities(9, &tiles, &config).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_house_filling_the_world_fits() {
        let mut config = small_config();
        config.world.size = 10;
        config.world.house_size = 10;
        config.world.house_count = 0;
        config.world.safe_zone = Zone::new(Cell::new(8, 8), 2);
        config.world.spawn = Cell::new(9, 9);
        config.world.destination = Cell::new(1, 1);

        let layout = generate_layout(1, &config.world).unwrap();
        assert!(layout.houses.is_empty());
        assert_eq!(layout.tiles.get(Cell::new(9, 9)), Some(&Tile::Spawn));
    }

    #[test]
    fn test_entities_unique_and_ordered() {
        let config = small_config();
        let tiles = generate_world(9, &config.world).unwrap();
        let entities = generate_entities(9, &tiles, &config).unwrap();

        assert_eq!(entities.len(), 61);
        assert_eq!(entities[0].kind, EntityKind::Player);
        assert_eq!(entities[0].cell, Cell::new(95, 95));

        let cells: AHashSet<Cell> = entities.iter().map(|e| e.cell).collect();
        assert_eq!(cells.len(), entities.len());

        for (i, entity) in entities.iter().enumerate() {
            assert_eq!(entity.id, EntityId(i as u32));
            assert_ne!(tiles.get(entity.cell), Some(&Tile::House));
        }
    }

    #[test]
    fn test_pursuers_avoid_safe_zone() {
        let config = small_config();
        let tiles = generate_world(2, &config.world).unwrap();
        let entities = generate_entities(2, &tiles, &config).unwrap();

        for entity in entities.iter().filter(|e| e.kind == EntityKind::Pursuer) {
            assert!(!config.world.safe_zone.contains(entity.cell));
        }
        for entity in entities.iter().filter(|e| e.kind == EntityKind::Human) {
            assert!(config.spawn.human_zone.contains(entity.cell));
        }
    }

    #[test]
    fn test_overcrowded_zone_fails() {
        let mut config = small_config();
        config.spawn.human_zone = Zone::new(Cell::new(90, 90), 2);
        config.spawn.human_count = 10;
        config.spawn.max_attempts_per_entity = 50;

        let tiles = generate_world(2, &config.world).unwrap();
        let err = generate_entities(2, &tiles, &config).unwrap_err();
        assert!(matches!(
            err,
            SimError::EntityPlacementFailed {
                kind: EntityKind::Human,
                placed: 4,
                ..
            }
        ));
    }
}
