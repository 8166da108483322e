//! Coarse pursuer density for the zoomed-out level of detail

use crate::core::types::Cell;
use crate::render::colors::heat_color;
use crate::spatial::grid::Grid;

/// M x M histogram of agent positions over an N x N world
#[derive(Debug, Clone)]
pub struct DensityGrid {
    world_size: usize,
    counts: Grid<u32>,
    max: u32,
}

impl DensityGrid {
    pub fn new(world_size: usize, resolution: usize) -> Self {
        Self {
            world_size: world_size.max(1),
            counts: Grid::square(resolution.max(1)),
            max: 0,
        }
    }

    pub fn resolution(&self) -> usize {
        self.counts.width
    }

    /// Coarse cell containing a world cell, `None` outside the world
    pub fn coarse_cell(&self, cell: Cell) -> Option<Cell> {
        if cell.x < 0
            || cell.y < 0
            || cell.x as usize >= self.world_size
            || cell.y as usize >= self.world_size
        {
            return None;
        }
        let m = self.resolution();
        Some(Cell::new(
            (cell.x as usize * m / self.world_size) as i32,
            (cell.y as usize * m / self.world_size) as i32,
        ))
    }

    /// Rebuild counts from scratch
    pub fn recompute(&mut self, positions: impl IntoIterator<Item = Cell>) {
        self.counts.fill(0);
        self.max = 0;
        for cell in positions {
            let Some(coarse) = self.coarse_cell(cell) else {
                continue;
            };
            if let Some(count) = self.counts.get_mut(coarse) {
                *count += 1;
                self.max = self.max.max(*count);
            }
        }
    }

    pub fn count_at(&self, coarse: Cell) -> u32 {
        self.counts.get(coarse).copied().unwrap_or(0)
    }

    pub fn max_count(&self) -> u32 {
        self.max
    }

    pub fn total(&self) -> u64 {
        self.counts.as_slice().iter().map(|&c| c as u64).sum()
    }

    /// Each count divided by the maximum; all zeros when nothing was counted
    pub fn normalized(&self) -> Grid<f32> {
        if self.max == 0 {
            return self.counts.map(|_| 0.0);
        }
        let max = self.max as f32;
        self.counts.map(|&count| count as f32 / max)
    }

    /// Row-major RGBA overlay, one pixel per coarse cell
    pub fn heat_pixels(&self) -> Vec<[u8; 4]> {
        self.normalized()
            .as_slice()
            .iter()
            .map(|&intensity| heat_color(intensity).to_rgba8())
            .collect()
    }
}
