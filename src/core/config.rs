//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section deserializes with
//! defaults, so a TOML file only needs to mention what it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{Cell, Zone};

/// Configuration for the whole simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldGenConfig,
    pub spawn: SpawnConfig,
    pub agents: AgentConfig,
    pub player: PlayerConfig,
    pub render: RenderConfig,
}

/// Terrain generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Side length N of the square world, in cells
    pub size: u32,

    /// Seed for terrain, entities and the tick stream
    pub seed: u64,

    /// Fixed Spawn marker. Must lie inside `safe_zone`.
    pub spawn: Cell,

    /// Fixed Destination marker
    pub destination: Cell,

    /// Square where pursuit never activates and no house or pursuer is placed
    ///
    /// Sits in the spawn corner so the player starts out of harm's way.
    pub safe_zone: Zone,

    /// Houses keep this many cells of clearance around the destination
    pub destination_margin: u32,

    /// Number of square house clusters to scatter
    pub house_count: u32,

    /// Side H of each house cluster
    pub house_size: u32,

    /// Minimum centre-to-centre distance between two houses
    ///
    /// Larger spacing spreads shelters out but makes placement harder;
    /// `house_count * spacing^2` should stay well below the world area.
    pub min_house_spacing: u32,

    /// Total random placements tried before generation gives up
    pub max_placement_attempts: u32,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            seed: 42,
            spawn: Cell::new(950, 950),
            destination: Cell::new(10, 10),
            safe_zone: Zone::new(Cell::new(900, 900), 100),
            destination_margin: 10,
            house_count: 400,
            house_size: 4,
            min_house_spacing: 12,
            max_placement_attempts: 100_000,
        }
    }
}

/// Initial entity population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Humans clustered inside `human_zone`
    pub human_count: u32,
    pub human_zone: Zone,

    /// Pursuers scattered over the whole map outside the safe zone
    pub pursuer_count: u32,

    /// Where the player starts. Validated to lie inside the safe zone.
    pub player_start: Cell,

    /// Random draws allowed per entity before placement gives up
    pub max_attempts_per_entity: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            human_count: 100,
            human_zone: Zone::new(Cell::new(900, 900), 100),
            pursuer_count: 5000,
            player_start: Cell::new(950, 950),
            max_attempts_per_entity: 1000,
        }
    }
}

/// Non-player agent behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// A pursuer chases when the player is within this many cells on both axes
    pub detection_radius: u32,

    /// Probability that a wandering agent stays put for a tick
    pub idle_chance: f64,

    /// Seed for wander decisions. `None` derives one from the world seed.
    pub tick_seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            detection_radius: 8,
            idle_chance: 0.5,
            tick_seed: None,
        }
    }
}

/// Player movement and stamina
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Longest path a single move request may cover
    pub max_path_steps: u32,

    pub max_stamina: u32,

    /// Stamina regained per recharge call (the UI calls it every 2 seconds)
    pub stamina_recharge: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_path_steps: 20,
            max_stamina: 100,
            stamina_recharge: 1,
        }
    }
}

/// Aggregation parameters consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side C of a visibility chunk, in cells
    pub chunk_size: u32,

    /// World units (pixels at zoom 1) per cell
    pub tile_px: f32,

    /// Side M of the coarse density grid
    pub heatmap_resolution: u32,

    /// Below this view scale the renderer switches to the density heatmap
    pub density_lod_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64,
            tile_px: 16.0,
            heatmap_resolution: 50,
            density_lod_scale: 0.1,
        }
    }
}

/// Salt mixed into the world seed for the tick stream, so wander draws are
/// not correlated with terrain generation.
const TICK_STREAM_SALT: u64 = 0x5EED_C1A7_B1E5;

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Seed used for the per-tick random stream
    pub fn tick_seed(&self) -> u64 {
        self.agents
            .tick_seed
            .unwrap_or(self.world.seed ^ TICK_STREAM_SALT)
    }

    /// The whole map as a zone
    pub fn bounds(&self) -> Zone {
        Zone::new(Cell::new(0, 0), self.world.size)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        let bounds = self.bounds();

        if world.size == 0 {
            return invalid("world.size must be positive".into());
        }

        if world.house_size == 0 || world.house_size >= world.size {
            return invalid(format!(
                "world.house_size ({}) must be in 1..{}",
                world.house_size, world.size
            ));
        }

        for (name, cell) in [
            ("world.spawn", world.spawn),
            ("world.destination", world.destination),
            ("spawn.player_start", self.spawn.player_start),
        ] {
            if !bounds.contains(cell) {
                return invalid(format!("{} {} lies outside the world", name, cell));
            }
        }

        if world.spawn == world.destination {
            return invalid("world.spawn and world.destination must differ".into());
        }

        if !world.safe_zone.contains(world.spawn) {
            return invalid(format!(
                "world.spawn {} must lie inside the safe zone",
                world.spawn
            ));
        }

        // A player starting outside the safe zone is chased from tick one
        if !world.safe_zone.contains(self.spawn.player_start) {
            return invalid(format!(
                "spawn.player_start {} lies outside the safe zone at {} (side {})",
                self.spawn.player_start, world.safe_zone.origin, world.safe_zone.side
            ));
        }

        if !(0.0..=1.0).contains(&self.agents.idle_chance) {
            return invalid(format!(
                "agents.idle_chance ({}) must be within [0, 1]",
                self.agents.idle_chance
            ));
        }

        if self.render.chunk_size == 0 || self.render.heatmap_resolution == 0 {
            return invalid("render.chunk_size and render.heatmap_resolution must be positive".into());
        }

        if self.render.tile_px <= 0.0 {
            return invalid("render.tile_px must be positive".into());
        }

        if self.player.max_stamina == 0 {
            return invalid("player.max_stamina must be positive".into());
        }

        Ok(())
    }
}

fn invalid(message: String) -> Result<()> {
    Err(SimError::InvalidConfig(message))
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let content = fs::read_to_string(path)?;
    let config = SimulationConfig::from_toml_str(&content)?;
    tracing::info!("Loaded simulation config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_player_start_outside_safe_zone_rejected() {
        let mut config = SimulationConfig::default();
        config.spawn.player_start = Cell::new(450, 450);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        assert!(err.to_string().contains("player_start"));
    }

    #[test]
    fn test_spawn_outside_safe_zone_rejected() {
        let mut config = SimulationConfig::default();
        config.world.spawn = Cell::new(100, 100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_idle_chance_bounds() {
        let mut config = SimulationConfig::default();
        config.agents.idle_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
[world]
seed = 7
house_count = 10

[agents]
detection_radius = 3
"#;
        let config = SimulationConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.house_count, 10);
        assert_eq!(config.world.size, 1000);
        assert_eq!(config.agents.detection_radius, 3);
        assert_eq!(config.player.max_path_steps, 20);
    }

    #[test]
    fn test_toml_zone_and_cell_syntax() {
        let toml_str = r#"
[world]
spawn = { x = 20, y = 20 }
safe_zone = { origin = { x = 0, y = 0 }, side = 40 }

[spawn]
player_start = { x = 21, y = 21 }
"#;
        let config = SimulationConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.world.spawn, Cell::new(20, 20));
        assert_eq!(config.world.safe_zone.side, 40);
    }

    #[test]
    fn test_invalid_toml_surfaces_error() {
        let err = SimulationConfig::from_toml_str("[world\nseed = ").unwrap_err();
        assert!(matches!(err, SimError::TomlError(_)));
    }

    #[test]
    fn test_tick_seed_override() {
        let mut config = SimulationConfig::default();
        let derived = config.tick_seed();
        assert_ne!(derived, config.world.seed);

        config.agents.tick_seed = Some(99);
        assert_eq!(config.tick_seed(), 99);
    }
}
