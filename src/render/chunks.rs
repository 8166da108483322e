//! Chunked visibility and lazily baked terrain content
//!
//! The map is partitioned into square chunks. Each camera change marks the
//! chunks under the view rectangle visible and everything else invisible.
//! Terrain never changes after generation, so a chunk's pixels are baked the
//! first time it becomes visible and kept for the rest of the session.

use rayon::prelude::*;

use crate::core::types::Cell;
use crate::render::camera::ViewRect;
use crate::render::colors::tile_color;
use crate::world::tile::TileGrid;

/// Chunk coordinates (not cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkIndex {
    pub cx: u32,
    pub cy: u32,
}

impl ChunkIndex {
    pub fn new(cx: u32, cy: u32) -> Self {
        Self { cx, cy }
    }
}

/// Baked RGBA pixels of one chunk, one pixel per cell
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkContent {
    /// Top-left cell covered by this chunk
    pub origin: Cell,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 4]>,
}

#[derive(Debug, Clone, Default)]
struct Chunk {
    visible: bool,
    content: Option<ChunkContent>,
}

/// Visibility flags and content cache for every chunk of the map
#[derive(Debug, Clone)]
pub struct ChunkCache {
    chunk_size: u32,
    tile_px: f32,
    chunks_x: u32,
    chunks_y: u32,
    chunks: Vec<Chunk>,
    generated: usize,
}

impl ChunkCache {
    pub fn new(world_width: usize, world_height: usize, chunk_size: u32, tile_px: f32) -> Self {
        let chunk_size = chunk_size.max(1);
        let chunks_x = (world_width as u32).div_ceil(chunk_size);
        let chunks_y = (world_height as u32).div_ceil(chunk_size);
        Self {
            chunk_size,
            tile_px,
            chunks_x,
            chunks_y,
            chunks: vec![Chunk::default(); (chunks_x * chunks_y) as usize],
            generated: 0,
        }
    }

    /// Number of chunks along each axis
    pub fn dimensions(&self) -> (u32, u32) {
        (self.chunks_x, self.chunks_y)
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Inclusive chunk range touched by `view`, clamped to the map
    ///
    /// `None` when the view lies entirely outside the map.
    pub fn visible_range(&self, view: &ViewRect) -> Option<(ChunkIndex, ChunkIndex)> {
        if self.chunks.is_empty() || !(view.width >= 0.0 && view.height >= 0.0) {
            return None;
        }

        let chunk_units = self.chunk_size as f32 * self.tile_px;
        let axis = |start: f32, end: f32, count: u32| -> Option<(u32, u32)> {
            let first = (start / chunk_units).floor();
            let last = (end / chunk_units).floor();
            if last < 0.0 || first >= count as f32 {
                return None;
            }
            let first = first.max(0.0) as u32;
            let last = (last as u32).min(count - 1);
            Some((first, last))
        };

        let (min_cx, max_cx) = axis(view.x, view.right(), self.chunks_x)?;
        let (min_cy, max_cy) = axis(view.y, view.bottom(), self.chunks_y)?;
        Some((ChunkIndex::new(min_cx, min_cy), ChunkIndex::new(max_cx, max_cy)))
    }

    /// Mark exactly the chunks under `view` visible and bake any that have
    /// never been seen before. Returns the visible chunks in row-major order.
    pub fn update_visibility(&mut self, tiles: &TileGrid, view: &ViewRect) -> Vec<ChunkIndex> {
        for chunk in &mut self.chunks {
            chunk.visible = false;
        }

        let Some((min, max)) = self.visible_range(view) else {
            return Vec::new();
        };

        let mut visible = Vec::new();
        let mut to_bake = Vec::new();
        for cy in min.cy..=max.cy {
            for cx in min.cx..=max.cx {
                let index = ChunkIndex::new(cx, cy);
                let slot = self.slot(index);
                let chunk = &mut self.chunks[slot];
                chunk.visible = true;
                if chunk.content.is_none() {
                    to_bake.push(index);
                }
                visible.push(index);
            }
        }

        if !to_bake.is_empty() {
            let chunk_size = self.chunk_size;
            let baked: Vec<(ChunkIndex, ChunkContent)> = to_bake
                .par_iter()
                .map(|&index| (index, bake_chunk(tiles, index, chunk_size)))
                .collect();

            tracing::debug!("Baked {} new chunks", baked.len());
            self.generated += baked.len();
            for (index, content) in baked {
                let slot = self.slot(index);
                self.chunks[slot].content = Some(content);
            }
        }

        visible
    }

    pub fn is_visible(&self, index: ChunkIndex) -> bool {
        self.get(index).is_some_and(|chunk| chunk.visible)
    }

    /// Cached pixels, `None` until the chunk has been visible once
    pub fn content(&self, index: ChunkIndex) -> Option<&ChunkContent> {
        self.get(index).and_then(|chunk| chunk.content.as_ref())
    }

    /// How many chunks have been baked so far
    pub fn generated_count(&self) -> usize {
        self.generated
    }

    pub fn visible_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.visible).count()
    }

    fn get(&self, index: ChunkIndex) -> Option<&Chunk> {
        if index.cx < self.chunks_x && index.cy < self.chunks_y {
            Some(&self.chunks[self.slot(index)])
        } else {
            None
        }
    }

    #[inline]
    fn slot(&self, index: ChunkIndex) -> usize {
        (index.cy * self.chunks_x + index.cx) as usize
    }
}

fn bake_chunk(tiles: &TileGrid, index: ChunkIndex, chunk_size: u32) -> ChunkContent {
    let origin = Cell::new(
        (index.cx * chunk_size) as i32,
        (index.cy * chunk_size) as i32,
    );
    // Edge chunks are cut short by the map border
    let width = (chunk_size as usize).min(tiles.width.saturating_sub(origin.x as usize));
    let height = (chunk_size as usize).min(tiles.height.saturating_sub(origin.y as usize));

    let mut pixels = Vec::with_capacity(width * height);
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            let tile = tiles.get(origin.offset(dx, dy)).copied().unwrap_or_default();
            pixels.push(tile_color(tile).to_rgba8());
        }
    }

    ChunkContent {
        origin,
        width,
        height,
        pixels,
    }
}
