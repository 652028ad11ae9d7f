//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::{CoordinateQuantizer, GridBounds};
use crate::obstacles::RandomGrid;

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell size in world units (1.0 = unit grid, smaller = precision grid)
    #[serde(default = "defaults::step")]
    pub step: f32,

    /// Limit the search to `width x height` cells starting at (0, 0)
    #[serde(default)]
    pub bounded: bool,

    /// Grid width (cells)
    #[serde(default = "defaults::grid_size")]
    pub width: u32,

    /// Grid height (cells)
    #[serde(default = "defaults::grid_size")]
    pub height: u32,

    /// Probability a cell is closed when generating a random grid
    #[serde(default = "defaults::closed_chance")]
    pub closed_chance: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            step: defaults::step(),
            bounded: false,
            width: defaults::grid_size(),
            height: defaults::grid_size(),
            closed_chance: defaults::closed_chance(),
        }
    }
}

impl GridSection {
    /// Quantizer for this grid's step
    pub fn to_quantizer(&self) -> CoordinateQuantizer {
        CoordinateQuantizer::new(self.step)
    }

    /// Bounds, when the grid is bounded
    pub fn to_bounds(&self) -> Option<GridBounds> {
        self.bounded.then(|| GridBounds::from_size(self.width, self.height))
    }

    /// Random grid generator with this grid's size
    pub fn to_random_grid(&self) -> RandomGrid {
        RandomGrid::new(self.width, self.height, self.closed_chance)
    }
}
