//! World - the single owner of all mutable simulation state
//!
//! Terrain is read-only after construction. Entity positions, occupancy,
//! the danger set and the pending player move only change through
//! [`run_simulation_tick`](crate::simulation::tick::run_simulation_tick) and
//! the player commands defined here.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Cell, EntityId, EntityKind, Tick};
use crate::pathfinding;
use crate::render::camera::{LevelOfDetail, ViewRect};
use crate::render::chunks::{ChunkCache, ChunkIndex};
use crate::render::heatmap::DensityGrid;
use crate::simulation::transaction::{CommitOutcome, PendingMove, Stamina};
use crate::spatial::grid::Grid;
use crate::spatial::occupancy::{DangerSet, OccupancyIndex};
use crate::world::entity::{Entity, Player};
use crate::world::generation::{generate_entities, generate_world};
use crate::world::tile::TileGrid;

/// The game world containing terrain, entities and the player
pub struct World {
    pub current_tick: Tick,
    pub(crate) config: SimulationConfig,
    pub(crate) tiles: TileGrid,
    /// Non-player agents in creation order
    pub(crate) agents: Vec<Entity>,
    agent_slots: AHashMap<EntityId, usize>,
    pub(crate) player: Player,
    pub(crate) occupancy: OccupancyIndex,
    pub(crate) danger: DangerSet,
    pub(crate) pending: Option<PendingMove>,
    pub(crate) stamina: Stamina,
    pub(crate) cursor: Option<Cell>,
    pub(crate) preview: Vec<Cell>,
    pub(crate) lod: LevelOfDetail,
    pub(crate) density: DensityGrid,
    chunks: ChunkCache,
    pub(crate) rng: ChaCha8Rng,
}

impl World {
    /// Validate the config, generate terrain and population from its seed
    pub fn generate(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.world.seed;
        let tiles = generate_world(seed, &config.world)?;
        let entities = generate_entities(seed, &tiles, &config)?;
        Self::from_parts(config, tiles, entities)
    }

    /// Assemble a world from pre-built terrain and entities
    ///
    /// Requires exactly one player and at most one entity per in-bounds
    /// cell. The config is used as-is, which lets scenarios place the
    /// player anywhere.
    pub fn from_parts(
        config: SimulationConfig,
        tiles: TileGrid,
        entities: Vec<Entity>,
    ) -> Result<Self> {
        let mut occupancy = OccupancyIndex::with_capacity(entities.len());
        let mut agents = Vec::with_capacity(entities.len().saturating_sub(1));
        let mut agent_slots = AHashMap::with_capacity(entities.len());
        let mut player = None;

        for entity in entities {
            if !tiles.in_bounds(entity.cell) {
                return Err(SimError::InvalidConfig(format!(
                    "entity {:?} at {} lies outside the world",
                    entity.id, entity.cell
                )));
            }
            if !occupancy.occupy(entity.cell, entity.id) {
                return Err(SimError::InvalidConfig(format!(
                    "two entities share cell {}",
                    entity.cell
                )));
            }

            match entity.kind {
                EntityKind::Player => {
                    if player.is_some() {
                        return Err(SimError::InvalidConfig("more than one player".into()));
                    }
                    player = Some(Player::new(entity.id, entity.cell));
                }
                EntityKind::Human | EntityKind::Pursuer => {
                    agent_slots.insert(entity.id, agents.len());
                    agents.push(entity);
                }
            }
        }

        let Some(player) = player else {
            return Err(SimError::InvalidConfig("no player entity".into()));
        };

        let render = &config.render;
        let density = DensityGrid::new(tiles.width, render.heatmap_resolution as usize);
        let chunks = ChunkCache::new(tiles.width, tiles.height, render.chunk_size, render.tile_px);
        let rng = ChaCha8Rng::seed_from_u64(config.tick_seed());
        let stamina = Stamina::new(config.player.max_stamina);

        let mut world = Self {
            current_tick: 0,
            config,
            tiles,
            agents,
            agent_slots,
            player,
            occupancy,
            danger: DangerSet::new(),
            pending: None,
            stamina,
            cursor: None,
            preview: Vec::new(),
            lod: LevelOfDetail::Agents,
            density,
            chunks,
            rng,
        };
        world.rebuild_danger();

        tracing::info!(
            "World ready: {}x{}, {} agents, player at {}",
            world.tiles.width,
            world.tiles.height,
            world.agents.len(),
            world.player.cell
        );

        Ok(world)
    }

    /// Replace the tick random stream, e.g. to pin agent behaviour in tests
    pub fn with_tick_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn agents(&self) -> &[Entity] {
        &self.agents
    }

    pub fn agent(&self, id: EntityId) -> Option<&Entity> {
        self.agent_slots.get(&id).map(|&slot| &self.agents[slot])
    }

    /// Kind of whoever stands on `cell`
    pub fn kind_at(&self, cell: Cell) -> Option<EntityKind> {
        let id = self.occupancy.occupant(cell)?;
        if id == self.player.id {
            return Some(EntityKind::Player);
        }
        self.agent(id).map(|agent| agent.kind)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    pub fn danger(&self) -> &DangerSet {
        &self.danger
    }

    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    pub fn stamina(&self) -> Stamina {
        self.stamina
    }

    pub fn cursor(&self) -> Option<Cell> {
        self.cursor
    }

    /// Path currently previewed under the cursor
    pub fn preview(&self) -> &[Cell] {
        &self.preview
    }

    pub fn level_of_detail(&self) -> LevelOfDetail {
        self.lod
    }

    pub fn chunks(&self) -> &ChunkCache {
        &self.chunks
    }

    pub fn pursuer_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.agents
            .iter()
            .filter(|agent| agent.kind.is_pursuer())
            .map(|agent| agent.cell)
    }

    /// Player plus agents; the dead player no longer counts
    pub fn live_entity_count(&self) -> usize {
        self.agents.len() + usize::from(self.player.alive)
    }

    /// Plan a path from the player to `target` against the current danger set
    pub fn find_path(&self, target: Cell) -> Vec<Cell> {
        pathfinding::find_path(
            self.player.cell,
            target,
            &self.tiles,
            &self.danger,
            self.config.player.max_path_steps,
        )
    }

    /// Record the cursor cell and refresh the preview path
    ///
    /// While a move is pending or the player is dead the preview stays empty.
    pub fn on_cursor_moved(&mut self, cell: Cell) -> &[Cell] {
        self.cursor = Some(cell);
        self.refresh_preview();
        &self.preview
    }

    /// Queue a move for the next tick
    pub fn commit(&mut self, path: Vec<Cell>) -> CommitOutcome {
        let outcome = if !self.player.alive {
            CommitOutcome::PlayerDead
        } else if self.pending.is_some() {
            CommitOutcome::AlreadyPending
        } else {
            match PendingMove::from_path(path) {
                Some(pending) => {
                    tracing::debug!(
                        "Committed move to {} costing {}",
                        pending.destination,
                        pending.cost
                    );
                    self.pending = Some(pending);
                    self.preview.clear();
                    CommitOutcome::Accepted
                }
                None => CommitOutcome::EmptyPath,
            }
        };

        if !outcome.is_accepted() {
            tracing::warn!("Commit rejected: {:?}", outcome);
        }
        outcome
    }

    /// Commit whatever the preview currently shows
    pub fn commit_preview(&mut self) -> CommitOutcome {
        let path = self.preview.clone();
        self.commit(path)
    }

    /// Drop the pending move. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            tracing::debug!("Pending move cancelled");
            self.refresh_preview();
        }
        cancelled
    }

    /// Periodic stamina regeneration. Returns the amount regained.
    pub fn recharge_stamina(&mut self) -> u32 {
        if !self.player.alive {
            return 0;
        }
        self.stamina.recharge(self.config.player.stamina_recharge)
    }

    /// Report the renderer's zoom; switching to the density view refreshes
    /// the heatmap immediately
    pub fn set_view_scale(&mut self, scale: f32) -> LevelOfDetail {
        let lod = LevelOfDetail::for_scale(scale, self.config.render.density_lod_scale);
        if lod != self.lod {
            tracing::debug!("Level of detail {:?} -> {:?}", self.lod, lod);
            self.lod = lod;
            if lod == LevelOfDetail::Density {
                self.refresh_density();
            }
        }
        lod
    }

    /// Mark the chunks under `view` visible, baking any seen for the first time
    pub fn update_visibility(&mut self, view: &ViewRect) -> Vec<ChunkIndex> {
        self.chunks.update_visibility(&self.tiles, view)
    }

    /// Fresh normalized pursuer density
    pub fn density_grid(&mut self) -> Grid<f32> {
        self.refresh_density();
        self.density.normalized()
    }

    /// Last computed density, without recomputing
    pub fn density(&self) -> &DensityGrid {
        &self.density
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    pub(crate) fn rebuild_danger(&mut self) {
        let pursuers = self
            .agents
            .iter()
            .filter(|agent| agent.kind.is_pursuer())
            .map(|agent| agent.cell);
        self.danger = self
            .occupancy
            .rebuild_danger(pursuers, self.tiles.width, self.tiles.height);
    }

    pub(crate) fn refresh_preview(&mut self) {
        self.preview.clear();
        if !self.player.alive || self.pending.is_some() {
            return;
        }
        if let Some(cursor) = self.cursor {
            self.preview = self.find_path(cursor);
        }
    }

    pub(crate) fn refresh_density(&mut self) {
        let pursuers = self
            .agents
            .iter()
            .filter(|agent| agent.kind.is_pursuer())
            .map(|agent| agent.cell);
        self.density.recompute(pursuers);
    }
}
