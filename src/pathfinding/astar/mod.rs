//! A* pathfinding algorithm.
//!
//! Implements A* search on the obstacle lattice with support for:
//! - 4- or 8-connected movement with Euclidean step costs
//! - Stable tie-breaking (equal f expands the earliest discovered node)
//! - Inspection of the frontier and expanded set after a run

mod planner;
mod search;
mod types;

pub use planner::AStarPlanner;
pub use search::{AStarSearch, search};
pub use types::{
    AStarConfig, Connectivity, Endpoint, EndpointIssue, NodeState, PathFailure, PathResult,
    SearchNode,
};

use crate::core::WorldPoint;
use crate::obstacles::ObstacleMap;

/// Quick path finding with default configuration
pub fn find_path(map: &ObstacleMap, start: WorldPoint, goal: WorldPoint) -> PathResult {
    let planner = AStarPlanner::with_defaults(map);
    planner.find_path_world(start, goal)
}

/// Check if a path exists
pub fn path_exists(map: &ObstacleMap, start: WorldPoint, goal: WorldPoint) -> bool {
    find_path(map, start, goal).success
}
