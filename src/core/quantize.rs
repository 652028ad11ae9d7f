//! Snapping continuous world positions onto the search lattice.
//!
//! The agent's start and the selected goal must go through the same
//! quantizer, otherwise the goal cell may not exist on the lattice the
//! search walks and is unreachable by construction.

use serde::{Deserialize, Serialize};

use super::point::{Cell, WorldPoint};

/// Maps world positions to lattice cells at a fixed step size.
///
/// A step of `1.0` gives the unit grid; smaller steps ("precision") give a
/// finer lattice over the same world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateQuantizer {
    step: f32,
}

impl Default for CoordinateQuantizer {
    fn default() -> Self {
        Self { step: 1.0 }
    }
}

impl CoordinateQuantizer {
    /// Create a quantizer with the given step.
    ///
    /// Non-finite or non-positive steps fall back to the unit grid.
    pub fn new(step: f32) -> Self {
        if step.is_finite() && step > 0.0 {
            Self { step }
        } else {
            log::warn!("[Quantizer] invalid step {}, using 1.0", step);
            Self::default()
        }
    }

    /// World-space size of one cell
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Nearest lattice cell to a world position (per-axis rounding).
    #[inline]
    pub fn to_cell(&self, point: WorldPoint) -> Cell {
        Cell::new(self.snap_axis(point.x), self.snap_axis(point.y))
    }

    /// World position of a lattice cell.
    #[inline]
    pub fn to_world(&self, cell: Cell) -> WorldPoint {
        WorldPoint::new(cell.x as f32 * self.step, cell.y as f32 * self.step)
    }

    /// Snap a world position to the world position of its cell.
    #[inline]
    pub fn snap(&self, point: WorldPoint) -> WorldPoint {
        self.to_world(self.to_cell(point))
    }

    /// Round a single world coordinate to a lattice index.
    #[inline]
    pub fn snap_axis(&self, value: f32) -> i32 {
        (value / self.step).round() as i32
    }
}

/// Nearest cell to `point` on a lattice with the given step.
pub fn to_cell(point: WorldPoint, step: f32) -> Cell {
    CoordinateQuantizer::new(step).to_cell(point)
}

/// World position of `cell` on a lattice with the given step.
pub fn to_world(cell: Cell, step: f32) -> WorldPoint {
    CoordinateQuantizer::new(step).to_world(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;

    #[test]
    fn test_unit_grid_rounding() {
        let q = CoordinateQuantizer::default();
        assert_eq!(q.to_cell(WorldPoint::new(0.4, -0.4)), Cell::new(0, 0));
        assert_eq!(q.to_cell(WorldPoint::new(0.6, -0.6)), Cell::new(1, -1));
        assert_eq!(q.to_cell(WorldPoint::new(3.0, 7.0)), Cell::new(3, 7));
    }

    #[test]
    fn test_precision_grid() {
        let q = CoordinateQuantizer::new(0.5);
        assert_eq!(q.to_cell(WorldPoint::new(1.0, 1.2)), Cell::new(2, 2));
        assert_eq!(q.to_cell(WorldPoint::new(-1.3, 0.1)), Cell::new(-3, 0));

        let w = q.to_world(Cell::new(3, -4));
        assert_relative_eq!(w.x, 1.5);
        assert_relative_eq!(w.y, -2.0);
    }

    #[test]
    fn test_invalid_step_falls_back() {
        assert_eq!(CoordinateQuantizer::new(0.0).step(), 1.0);
        assert_eq!(CoordinateQuantizer::new(-2.0).step(), 1.0);
        assert_eq!(CoordinateQuantizer::new(f32::NAN).step(), 1.0);
    }

    #[test]
    fn test_round_trip_within_step() {
        let mut rng = StdRng::seed_from_u64(7);
        for &step in &[1.0_f32, 0.5, 0.2, 0.35] {
            for _ in 0..500 {
                let p = WorldPoint::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
                let back = to_world(to_cell(p, step), step);
                assert!(
                    back.distance(&p) <= step,
                    "step {} point {:?} came back as {:?}",
                    step,
                    p,
                    back
                );
            }
        }
    }

    #[test]
    fn test_snap_is_idempotent() {
        let q = CoordinateQuantizer::new(0.25);
        let once = q.snap(WorldPoint::new(2.13, -0.61));
        assert_eq!(q.snap(once), once);
    }
}
