//! Goal-driven navigation: obstacles, planning and following in one place.

use log::{debug, info, warn};

use crate::config::MargaConfig;
use crate::core::{CoordinateQuantizer, GridBounds, WorldPoint};
use crate::obstacles::{ObstacleMap, ObstacleShape};
use crate::pathfinding::{AStarConfig, AStarPlanner, AStarSearch, PathFailure};

use super::follower::{FollowerConfig, PathFollower, TickEvent};

/// Owns the obstacle shapes and drives one agent toward requested goals.
///
/// The obstacle map is rebuilt from the current shapes on every goal
/// request, so toggling a shape takes effect at the next `set_goal`. The
/// path already being followed is not affected.
#[derive(Debug)]
pub struct Navigator {
    shapes: Vec<ObstacleShape>,
    quantizer: CoordinateQuantizer,
    bounds: Option<GridBounds>,
    astar: AStarConfig,
    search: AStarSearch,
    follower: PathFollower,
}

impl Navigator {
    /// Create a navigator with no obstacles and the agent at `start`.
    pub fn new(
        quantizer: CoordinateQuantizer,
        bounds: Option<GridBounds>,
        astar: AStarConfig,
        follower: FollowerConfig,
        start: WorldPoint,
    ) -> Self {
        Self {
            shapes: Vec::new(),
            quantizer,
            bounds,
            search: AStarSearch::new(astar.clone()),
            astar,
            follower: PathFollower::new(follower, start),
        }
    }

    /// Create from loaded configuration.
    pub fn from_config(config: &MargaConfig, start: WorldPoint) -> Self {
        Self::new(
            config.grid.to_quantizer(),
            config.grid.to_bounds(),
            config.pathfinding.to_astar_config(),
            config.follower.to_follower_config(),
            start,
        )
    }

    /// Builder-style obstacle list.
    pub fn with_obstacles(mut self, shapes: Vec<ObstacleShape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Add an obstacle and return its index.
    pub fn add_obstacle(&mut self, shape: ObstacleShape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Enable or disable an obstacle for subsequent searches.
    ///
    /// Returns `false` when no obstacle has that index.
    pub fn set_obstacle_active(&mut self, index: usize, active: bool) -> bool {
        match self.shapes.get_mut(index) {
            Some(shape) => {
                shape.active = active;
                debug!("[Navigator] obstacle {} active={}", index, active);
                true
            }
            None => {
                warn!(
                    "[Navigator] no obstacle {} ({} defined)",
                    index,
                    self.shapes.len()
                );
                false
            }
        }
    }

    /// Obstacle shapes, in the order they were added
    pub fn obstacles(&self) -> &[ObstacleShape] {
        &self.shapes
    }

    /// Rasterize the current shapes.
    pub fn obstacle_map(&self) -> ObstacleMap {
        ObstacleMap::build(&self.shapes, self.quantizer, self.bounds)
    }

    /// Plan from the agent's position to `goal` and start following the result.
    ///
    /// When the agent's cell is rejected mid-leg, the plan starts from an
    /// open end of the current leg instead. Returns the number of waypoints.
    /// On failure the agent stops and any previous path is dropped.
    pub fn set_goal(&mut self, goal: WorldPoint) -> Result<usize, PathFailure> {
        let map = self.obstacle_map();
        let planner = AStarPlanner::new(&map, self.astar.clone());
        let target = self.quantizer.to_cell(goal);

        let start = self.quantizer.to_cell(self.follower.position());
        let mut result = planner.find_path_with(&mut self.search, start, target);
        for origin in self.follower.plan_origins().into_iter().skip(1) {
            if !result.failure_reason.is_some_and(|f| f.is_start_rejected()) {
                break;
            }
            let start = self.quantizer.to_cell(origin);
            debug!("[Navigator] start rejected, replanning from {}", start);
            result = planner.find_path_with(&mut self.search, start, target);
        }

        match self.follower.adopt(result) {
            Ok(count) => {
                info!(
                    "[Navigator] goal ({:.2},{:.2}): {} waypoints, {} expansions",
                    goal.x,
                    goal.y,
                    count,
                    self.search.nodes_expanded()
                );
                Ok(count)
            }
            Err(reason) => {
                info!(
                    "[Navigator] goal ({:.2},{:.2}) rejected: {}",
                    goal.x, goal.y, reason
                );
                Err(reason)
            }
        }
    }

    /// Advance the agent by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickEvent {
        self.follower.tick(dt)
    }

    /// Suspend movement
    pub fn pause(&mut self) {
        self.follower.pause();
    }

    /// Continue movement
    pub fn resume(&mut self) {
        self.follower.resume();
    }

    /// Flip between paused and following
    pub fn toggle_pause(&mut self) {
        self.follower.toggle_pause();
    }

    /// Agent position
    pub fn position(&self) -> WorldPoint {
        self.follower.position()
    }

    /// The follower
    pub fn follower(&self) -> &PathFollower {
        &self.follower
    }

    /// Mutable follower access
    pub fn follower_mut(&mut self) -> &mut PathFollower {
        &mut self.follower
    }

    /// Search state of the most recent `set_goal`, for debug overlays.
    pub fn last_search(&self) -> &AStarSearch {
        &self.search
    }
}
