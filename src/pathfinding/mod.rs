//! Path planning.
//!
//! ```rust
//! use marga::core::WorldPoint;
//! use marga::obstacles::ObstacleMap;
//! use marga::pathfinding::{AStarConfig, AStarPlanner, Connectivity};
//!
//! let map = ObstacleMap::default();
//! let planner = AStarPlanner::new(&map, AStarConfig::with_connectivity(Connectivity::Four));
//!
//! let result = planner.find_path_world(WorldPoint::ZERO, WorldPoint::new(3.0, 0.0));
//! assert!(result.success);
//! assert_eq!(result.path_world.len(), 4);
//! ```

pub mod astar;

pub use astar::{
    AStarConfig, AStarPlanner, AStarSearch, Connectivity, Endpoint, EndpointIssue, PathFailure,
    PathResult, find_path, path_exists,
};

use crate::core::WorldPoint;

/// Something that turns a start/goal pair into a path.
///
/// The follower plans through this so it does not care which map snapshot
/// or search configuration is behind it.
pub trait PathPlanner {
    /// Plan from `start` to `goal` in world coordinates.
    fn plan(&self, start: WorldPoint, goal: WorldPoint) -> PathResult;
}
