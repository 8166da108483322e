//! View rectangle and level-of-detail selection
//!
//! Everything here works in world units: one cell spans `tile_px` units at
//! scale 1.0. The renderer owns the actual camera and reports what it sees.

use crate::core::types::Cell;

/// Visible region of the map in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle seen by a viewport of `screen` pixels centred on `center`
    /// at the given zoom scale
    pub fn centered(center: (f32, f32), screen: (f32, f32), scale: f32) -> Self {
        let width = screen.0 / scale;
        let height = screen.1 / scale;
        Self {
            x: center.0 - width / 2.0,
            y: center.1 - height / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// What the renderer should draw at the current zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelOfDetail {
    /// Individual entity markers
    #[default]
    Agents,
    /// Aggregated pursuer density
    Density,
}

impl LevelOfDetail {
    /// Zoomed out below `threshold`, individual agents stop being legible
    pub fn for_scale(scale: f32, threshold: f32) -> Self {
        if scale < threshold {
            LevelOfDetail::Density
        } else {
            LevelOfDetail::Agents
        }
    }
}

/// Cell under a world-space point, e.g. the mouse cursor
pub fn world_to_cell(world_x: f32, world_y: f32, tile_px: f32) -> Cell {
    Cell::new(
        (world_x / tile_px).floor() as i32,
        (world_y / tile_px).floor() as i32,
    )
}

/// World-space centre of a cell
pub fn cell_center(cell: Cell, tile_px: f32) -> (f32, f32) {
    (
        (cell.x as f32 + 0.5) * tile_px,
        (cell.y as f32 + 0.5) * tile_px,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lod_threshold() {
        assert_eq!(LevelOfDetail::for_scale(1.0, 0.1), LevelOfDetail::Agents);
        assert_eq!(LevelOfDetail::for_scale(0.1, 0.1), LevelOfDetail::Agents);
        assert_eq!(LevelOfDetail::for_scale(0.05, 0.1), LevelOfDetail::Density);
    }

    #[test]
    fn test_world_to_cell_floors() {
        assert_eq!(world_to_cell(31.9, 16.0, 16.0), Cell::new(1, 1));
        assert_eq!(world_to_cell(-0.5, 0.0, 16.0), Cell::new(-1, 0));
    }

    #[test]
    fn test_centered_view() {
        let view = ViewRect::centered((400.0, 300.0), (800.0, 600.0), 2.0);
        assert_eq!(view.x, 200.0);
        assert_eq!(view.y, 150.0);
        assert_eq!(view.right(), 600.0);
        assert_eq!(view.bottom(), 450.0);
    }

    #[test]
    fn test_cell_center_round_trip() {
        let cell = Cell::new(7, 3);
        let (x, y) = cell_center(cell, 16.0);
        assert_eq!(world_to_cell(x, y, 16.0), cell);
    }
}
