//! Rasterized obstacle map.
//!
//! Converts rectangle obstacles into a set of blocked lattice cells:
//!
//! ```text
//!   TL ●───────● TR        each corner is rounded to its nearest cell,
//!      │ ▓▓▓▓▓ │           then every cell between the left/right corner x
//!      │ ▓▓▓▓▓ │           and the bottom/top corner y (inclusive) is
//!   BL ●───────● BR        marked blocked
//! ```
//!
//! The map is a snapshot. Toggling or moving shapes afterwards has no
//! effect until the map is rebuilt.

use std::collections::HashSet;

use log::trace;

use crate::core::{Cell, CoordinateQuantizer, GridBounds, WorldPoint};

use super::Occupancy;
use super::shape::ObstacleShape;

/// Blocked-cell set built from obstacle shapes.
#[derive(Clone, Debug, Default)]
pub struct ObstacleMap {
    quantizer: CoordinateQuantizer,
    bounds: Option<GridBounds>,
    blocked: HashSet<Cell>,
}

impl ObstacleMap {
    /// Create an empty map.
    pub fn new(quantizer: CoordinateQuantizer, bounds: Option<GridBounds>) -> Self {
        Self {
            quantizer,
            bounds,
            blocked: HashSet::new(),
        }
    }

    /// Rasterize every active shape.
    pub fn build(
        shapes: &[ObstacleShape],
        quantizer: CoordinateQuantizer,
        bounds: Option<GridBounds>,
    ) -> Self {
        let mut map = Self::new(quantizer, bounds);
        let mut skipped = 0;
        for shape in shapes {
            if shape.active {
                map.rasterize(shape);
            } else {
                skipped += 1;
            }
        }

        trace!(
            "[ObstacleMap] built from {} shapes ({} inactive): {} blocked cells, step={}",
            shapes.len(),
            skipped,
            map.blocked.len(),
            quantizer.step()
        );
        map
    }

    /// Build directly from a set of blocked cells.
    pub fn from_cells(
        cells: impl IntoIterator<Item = Cell>,
        quantizer: CoordinateQuantizer,
        bounds: Option<GridBounds>,
    ) -> Self {
        Self {
            quantizer,
            bounds,
            blocked: cells.into_iter().collect(),
        }
    }

    /// Add the cells covered by one shape, regardless of its active flag.
    ///
    /// Returns the number of newly blocked cells.
    pub fn rasterize(&mut self, shape: &ObstacleShape) -> usize {
        let tl = self.quantizer.to_cell(shape.top_left());
        let tr = self.quantizer.to_cell(shape.top_right());
        let bl = self.quantizer.to_cell(shape.bottom_left());

        let (mut x_min, mut x_max) = (tl.x.min(tr.x), tl.x.max(tr.x));
        let (mut y_min, mut y_max) = (bl.y.min(tl.y), bl.y.max(tl.y));

        // Outside cells already read as blocked; only the overlap is stored
        if let Some(bounds) = self.bounds {
            x_min = x_min.max(bounds.min.x);
            x_max = x_max.min(bounds.max.x);
            y_min = y_min.max(bounds.min.y);
            y_max = y_max.min(bounds.max.y);
        }

        let before = self.blocked.len();
        for x in x_min..=x_max {
            for y in y_min..=y_max {
                self.blocked.insert(Cell::new(x, y));
            }
        }
        self.blocked.len() - before
    }

    /// Mark a single cell blocked.
    pub fn block(&mut self, cell: Cell) -> bool {
        self.blocked.insert(cell)
    }

    /// Clear a single cell. Cells outside the bounds stay blocked.
    pub fn unblock(&mut self, cell: Cell) -> bool {
        self.blocked.remove(&cell)
    }

    /// Is the cell blocked (by a shape or by lying outside the bounds)?
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.blocked.contains(&cell)
    }

    /// Is the cell free to traverse?
    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Blocked query for a world position (quantized with this map's step).
    pub fn is_blocked_world(&self, point: WorldPoint) -> bool {
        self.is_blocked(self.quantizer.to_cell(point))
    }

    /// Is the cell inside the traversable region? Unbounded maps contain every cell.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.bounds.is_none_or(|b| b.contains(cell))
    }

    /// Cells blocked by shapes (out-of-bounds cells are not listed).
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.blocked.iter().copied()
    }

    /// Number of cells blocked by shapes
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// No cell blocked by a shape?
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Traversable region, if bounded
    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Quantizer the shapes were rasterized with
    pub fn quantizer(&self) -> CoordinateQuantizer {
        self.quantizer
    }

    /// World-space size of one cell
    pub fn step(&self) -> f32 {
        self.quantizer.step()
    }
}

impl Occupancy for ObstacleMap {
    #[inline]
    fn is_blocked(&self, cell: Cell) -> bool {
        ObstacleMap::is_blocked(self, cell)
    }

    #[inline]
    fn in_bounds(&self, cell: Cell) -> bool {
        ObstacleMap::in_bounds(self, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> CoordinateQuantizer {
        CoordinateQuantizer::default()
    }

    #[test]
    fn test_single_shape_rasterization() {
        // Spans x in [1, 2], y = 0 once corners are rounded
        let shape = ObstacleShape::new(WorldPoint::new(1.5, 0.0), WorldPoint::new(0.5, 0.4));
        let map = ObstacleMap::build(&[shape], unit(), None);

        assert_eq!(map.len(), 2);
        assert!(map.is_blocked(Cell::new(1, 0)));
        assert!(map.is_blocked(Cell::new(2, 0)));
        assert!(!map.is_blocked(Cell::new(0, 0)));
        assert!(!map.is_blocked(Cell::new(3, 0)));
        assert!(!map.is_blocked(Cell::new(1, 1)));
    }

    #[test]
    fn test_corners_round_independently() {
        // x: 0.3..2.7 -> 0..3, y: -1.2..1.2 -> -1..1
        let shape = ObstacleShape::new(WorldPoint::new(1.5, 0.0), WorldPoint::new(1.2, 1.2));
        let map = ObstacleMap::build(&[shape], unit(), None);

        assert_eq!(map.len(), 4 * 3);
        assert!(map.is_blocked(Cell::new(0, -1)));
        assert!(map.is_blocked(Cell::new(3, 1)));
        assert!(!map.is_blocked(Cell::new(4, 0)));
        assert!(!map.is_blocked(Cell::new(0, 2)));
    }

    #[test]
    fn test_inactive_shapes_skipped() {
        let shapes = vec![
            ObstacleShape::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(0.4, 0.4)),
            ObstacleShape::new(WorldPoint::new(5.0, 5.0), WorldPoint::new(0.4, 0.4))
                .with_active(false),
        ];
        let map = ObstacleMap::build(&shapes, unit(), None);

        assert!(map.is_blocked(Cell::new(0, 0)));
        assert!(!map.is_blocked(Cell::new(5, 5)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_precision_step_rasterization() {
        // 1x1 world square at step 0.5 covers 3x3 lattice cells
        let shape = ObstacleShape::new(WorldPoint::new(1.0, 1.0), WorldPoint::new(0.5, 0.5));
        let map = ObstacleMap::build(&[shape], CoordinateQuantizer::new(0.5), None);

        assert_eq!(map.len(), 9);
        assert!(map.is_blocked(Cell::new(1, 1)));
        assert!(map.is_blocked(Cell::new(3, 3)));
        assert!(map.is_blocked_world(WorldPoint::new(1.2, 0.8)));
        assert!(!map.is_blocked_world(WorldPoint::new(2.1, 1.0)));
    }

    #[test]
    fn test_bounds_block_outside() {
        let map = ObstacleMap::new(unit(), Some(GridBounds::from_size(5, 5)));

        assert!(map.is_empty());
        assert!(!map.is_blocked(Cell::new(0, 0)));
        assert!(!map.is_blocked(Cell::new(4, 4)));
        assert!(map.is_blocked(Cell::new(5, 0)));
        assert!(map.is_blocked(Cell::new(0, -1)));
        assert!(!map.in_bounds(Cell::new(-1, 2)));
    }

    #[test]
    fn test_rasterize_clamped_to_bounds() {
        let bounds = GridBounds::from_size(20, 20);
        let huge = ObstacleShape::new(WorldPoint::new(10.0, 10.0), WorldPoint::new(1e5, 1e5));
        let map = ObstacleMap::build(&[huge], unit(), Some(bounds));
        assert_eq!(map.len(), bounds.area());
        assert!(map.is_blocked(Cell::new(-5, 3)));

        // Partly outside: only the in-bounds columns are stored
        let edge = ObstacleShape::new(WorldPoint::new(0.0, 5.0), WorldPoint::new(3.0, 0.0));
        let map = ObstacleMap::build(&[edge], unit(), Some(bounds));
        assert_eq!(map.len(), 4);
        assert!(map.blocked_cells().all(|c| bounds.contains(c)));

        // Entirely outside stores nothing
        let away = ObstacleShape::new(WorldPoint::new(-50.0, -50.0), WorldPoint::new(2.0, 2.0));
        let map = ObstacleMap::build(&[away], unit(), Some(bounds));
        assert!(map.is_empty());
    }

    #[test]
    fn test_from_cells_and_edits() {
        let mut map = ObstacleMap::from_cells([Cell::new(1, 1), Cell::new(2, 2)], unit(), None);
        assert_eq!(map.len(), 2);

        assert!(map.unblock(Cell::new(1, 1)));
        assert!(!map.is_blocked(Cell::new(1, 1)));
        assert!(map.block(Cell::new(7, 7)));
        assert!(!map.block(Cell::new(7, 7)));
        assert_eq!(map.blocked_cells().count(), 2);
    }

    #[test]
    fn test_overlapping_shapes_count_once() {
        let a = ObstacleShape::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(1.0, 0.0));
        let b = ObstacleShape::new(WorldPoint::new(1.0, 0.0), WorldPoint::new(1.0, 0.0));
        let map = ObstacleMap::build(&[a, b], unit(), None);

        // -1..1 and 0..2 on row 0
        assert_eq!(map.len(), 4);
    }
}
