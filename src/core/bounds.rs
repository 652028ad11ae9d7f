//! Inclusive cell rectangle limiting where the search may go.

use serde::{Deserialize, Serialize};

use super::point::Cell;

/// Axis-aligned, inclusive range of lattice cells.
///
/// Cells outside the bounds are treated as blocked by the obstacle map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Smallest x and y (inclusive)
    pub min: Cell,
    /// Largest x and y (inclusive)
    pub max: Cell,
}

impl GridBounds {
    /// Create bounds from two corners; the corners may be given in any order.
    pub fn new(a: Cell, b: Cell) -> Self {
        Self {
            min: Cell::new(a.x.min(b.x), a.y.min(b.y)),
            max: Cell::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// `width x height` cells with the origin cell at (0, 0).
    ///
    /// Zero sizes are clamped to a single row/column.
    pub fn from_size(width: u32, height: u32) -> Self {
        let w = width.max(1) as i32;
        let h = height.max(1) as i32;
        Self::new(Cell::new(0, 0), Cell::new(w - 1, h - 1))
    }

    /// Is the cell inside the bounds?
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x + 1) as u32
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y + 1) as u32
    }

    /// Total number of cells
    #[inline]
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Iterate all cells, row by row from `min.y`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Cell::new(x, y)))
    }
}
