//! Random bounded grids.
//!
//! Every cell of a `width x height` grid is closed with a fixed probability,
//! except one cell that is always left open (usually the agent's cell).

use rand::Rng;

use crate::core::{Cell, CoordinateQuantizer, GridBounds};

use super::map::ObstacleMap;

/// Parameters for random grid generation.
#[derive(Clone, Debug)]
pub struct RandomGrid {
    /// Columns
    pub width: u32,
    /// Rows
    pub height: u32,
    /// Probability in [0, 1] that a cell is closed
    pub closed_chance: f32,
}

impl Default for RandomGrid {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            closed_chance: 0.2,
        }
    }
}

impl RandomGrid {
    /// Create generation parameters.
    pub fn new(width: u32, height: u32, closed_chance: f32) -> Self {
        Self {
            width,
            height,
            closed_chance,
        }
    }

    /// Bounds of the generated grid.
    pub fn bounds(&self) -> GridBounds {
        GridBounds::from_size(self.width, self.height)
    }

    /// Generate a unit-step obstacle map with `keep_open` guaranteed free.
    pub fn generate<R: Rng + ?Sized>(&self, keep_open: Cell, rng: &mut R) -> ObstacleMap {
        let chance = self.closed_chance.clamp(0.0, 1.0);
        let bounds = self.bounds();

        let mut map = ObstacleMap::new(CoordinateQuantizer::default(), Some(bounds));
        for cell in bounds.cells() {
            // Draw for every cell so the sequence does not depend on keep_open
            let closed = rng.r#gen::<f32>() < chance;
            if closed && cell != keep_open {
                map.block(cell);
            }
        }

        log::debug!(
            "[RandomGrid] {}x{} grid, {} of {} cells closed (chance {:.2})",
            self.width,
            self.height,
            map.len(),
            bounds.area(),
            chance
        );
        map
    }
}
