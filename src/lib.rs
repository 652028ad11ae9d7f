//! # Marga: obstacle-aware grid pathfinding
//!
//! Finds shortest paths across a 2D lattice that avoid rectangular
//! obstacles, and moves an agent along them one fixed-step tick at a time.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::core::{CoordinateQuantizer, WorldPoint};
//! use marga::navigation::{FollowerConfig, Navigator, TickEvent};
//! use marga::obstacles::ObstacleShape;
//! use marga::pathfinding::{AStarConfig, Connectivity};
//!
//! let mut nav = Navigator::new(
//!     CoordinateQuantizer::default(),
//!     None,
//!     AStarConfig::with_connectivity(Connectivity::Four),
//!     FollowerConfig::default(),
//!     WorldPoint::ZERO,
//! )
//! .with_obstacles(vec![ObstacleShape::new(
//!     WorldPoint::new(1.5, 0.0),
//!     WorldPoint::new(0.5, 0.4),
//! )]);
//!
//! let waypoints = nav.set_goal(WorldPoint::new(3.0, 0.0)).unwrap();
//! assert_eq!(waypoints, 6); // detour around the blocked cells
//!
//! while nav.tick(0.02) != TickEvent::GoalReached {}
//! assert_eq!(nav.position(), WorldPoint::new(3.0, 0.0));
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Cells, world points, quantization, bounds
//! - [`obstacles`]: Obstacle shapes, rasterized maps, random grids
//! - [`pathfinding`]: Arena-based A* search and the world-level planner
//! - [`navigation`]: Tick-driven path follower and goal navigator
//! - [`config`]: YAML configuration
//! - [`io`]: Scenario files
//!
//! ## Data Flow
//!
//! ```text
//!   goal (world) ──► CoordinateQuantizer ──► start/goal cells
//!                                                 │
//!   ObstacleShape[] ──► ObstacleMap (rebuilt) ────┤
//!                                                 ▼
//!                                            AStarSearch
//!                                                 │ PathResult
//!                                                 ▼
//!                          tick(dt) ──────► PathFollower ──► agent position
//! ```

pub mod config;
pub mod core;
pub mod io;
pub mod navigation;
pub mod obstacles;
pub mod pathfinding;

// Re-export main types at crate root
pub use config::{ConfigLoadError, MargaConfig};
pub use crate::core::{Cell, CoordinateQuantizer, GridBounds, WorldPoint};
pub use navigation::{FollowState, FollowerConfig, Navigator, PathFollower, TickEvent};
pub use obstacles::{ObstacleMap, ObstacleShape, Occupancy, RandomGrid};
pub use pathfinding::{
    AStarConfig, AStarPlanner, AStarSearch, Connectivity, PathFailure, PathPlanner, PathResult,
};
