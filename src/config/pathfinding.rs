//! Pathfinding configuration section.

use serde::{Deserialize, Serialize};

use crate::pathfinding::{AStarConfig, Connectivity};

use super::defaults;

/// Pathfinding configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathfindingSection {
    /// Neighbor count: 4 (cardinal) or 8 (with diagonals)
    #[serde(default = "defaults::connectivity")]
    pub connectivity: Connectivity,

    /// Expansion cap per search
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,
}

impl Default for PathfindingSection {
    fn default() -> Self {
        Self {
            connectivity: defaults::connectivity(),
            max_iterations: defaults::max_iterations(),
        }
    }
}

impl PathfindingSection {
    /// Convert to AStarConfig
    pub fn to_astar_config(&self) -> AStarConfig {
        AStarConfig {
            connectivity: self.connectivity,
            max_iterations: self.max_iterations,
        }
    }
}
