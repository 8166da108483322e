//! Generic grid for spatial data

use crate::core::types::Cell;

/// Generic 2D grid stored as a flat row-major array
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    /// Row-major index of a cell, `None` when out of bounds
    #[inline]
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index % self.width) as i32, (index / self.width) as i32)
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index_of(cell).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.index_of(cell).map(move |i| &mut self.data[i])
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: T) {
        if let Some(i) = self.index_of(cell) {
            self.data[i] = value;
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(cell, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, value)| (self.cell_at(i), value))
    }

    /// Map every cell into a new grid of the same shape
    pub fn map<U: Clone + Default>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(&mut f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_and_indexing() {
        let grid: Grid<u8> = Grid::new(4, 3);
        assert_eq!(grid.len(), 12);
        assert!(grid.in_bounds(Cell::new(3, 2)));
        assert!(!grid.in_bounds(Cell::new(4, 0)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));
        assert_eq!(grid.index_of(Cell::new(1, 2)), Some(9));
        assert_eq!(grid.cell_at(9), Cell::new(1, 2));
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut grid: Grid<u8> = Grid::square(2);
        grid.set(Cell::new(5, 5), 9);
        grid.set(Cell::new(1, 1), 7);
        assert_eq!(grid.get(Cell::new(1, 1)), Some(&7));
        assert_eq!(grid.as_slice().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_map_preserves_shape() {
        let mut grid: Grid<u32> = Grid::new(3, 2);
        grid.set(Cell::new(2, 1), 4);
        let halves = grid.map(|&v| v as f32 / 2.0);
        assert_eq!(halves.width, 3);
        assert_eq!(halves.get(Cell::new(2, 1)), Some(&2.0));
    }
}
