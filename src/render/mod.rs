//! Spatial aggregation for an external renderer
//!
//! Chunk visibility, the density heatmap and per-frame entity snapshots.
//! Nothing here draws; the renderer polls these on camera change and once
//! per tick.

pub mod camera;
pub mod chunks;
pub mod colors;
pub mod heatmap;

pub use camera::{LevelOfDetail, ViewRect};
pub use chunks::{ChunkCache, ChunkContent, ChunkIndex};
pub use heatmap::DensityGrid;

use crate::core::types::{Cell, EntityKind};
use crate::ecs::world::World;
use crate::render::colors::{kind_color, Color};

/// Lightweight snapshot of an entity for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderEntity {
    pub cell: Cell,
    pub kind: EntityKind,
}

impl RenderEntity {
    pub fn color(&self) -> Color {
        kind_color(self.kind)
    }
}

/// Collects the player (while alive) and every agent into a reusable buffer.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_render_entities(world: &World, buffer: &mut Vec<RenderEntity>) {
    buffer.clear();

    let player = world.player();
    if player.alive {
        buffer.push(RenderEntity {
            cell: player.cell,
            kind: EntityKind::Player,
        });
    }

    buffer.extend(world.agents().iter().map(|agent| RenderEntity {
        cell: agent.cell,
        kind: agent.kind,
    }));
}
