//! Color definitions for tiles, entities and the density heatmap

use crate::core::types::EntityKind;
use crate::world::tile::Tile;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear blend towards `other` (0.0 = self, 1.0 = other)
    pub fn lerp(&self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantize to 8-bit channels for pixel buffers
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Base color for a terrain tile
pub fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Grass => Color::new(0.24, 0.55, 0.22, 1.0),       // Meadow green
        Tile::House => Color::new(0.55, 0.35, 0.2, 1.0),        // Timber brown
        Tile::Spawn => Color::new(0.3, 0.5, 0.95, 1.0),         // Blue
        Tile::Destination => Color::new(0.95, 0.8, 0.15, 1.0),  // Gold
    }
}

/// Marker color for an entity
pub fn kind_color(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Player => Color::new(1.0, 1.0, 1.0, 1.0),   // White
        EntityKind::Human => Color::new(0.2, 0.6, 0.9, 1.0),    // Blue
        EntityKind::Pursuer => Color::new(0.8, 0.1, 0.1, 1.0),  // Blood red
    }
}

/// Heatmap ramp for a normalized density: transparent, through yellow, to red
pub fn heat_color(intensity: f32) -> Color {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity == 0.0 {
        return Color::new(0.0, 0.0, 0.0, 0.0);
    }
    let cool = Color::new(1.0, 0.9, 0.2, 0.35);
    let hot = Color::new(0.85, 0.05, 0.05, 0.85);
    cool.lerp(hot, intensity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_colors_distinct() {
        let tiles = [Tile::Grass, Tile::House, Tile::Spawn, Tile::Destination];
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                assert_ne!(tile_color(*a), tile_color(*b));
            }
        }
    }

    #[test]
    fn test_to_rgba8_clamps() {
        let color = Color::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(color.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_heat_ramp_endpoints() {
        assert_eq!(heat_color(0.0).a, 0.0);
        let hottest = heat_color(1.0);
        assert!(hottest.r > hottest.g);
        assert!(heat_color(0.5).a > heat_color(0.1).a);
    }
}
