//! Waypoint path follower.
//!
//! Moves an agent along the most recent path, one waypoint at a time, on
//! explicit `tick(dt)` calls from a caller-owned fixed-step scheduler.
//!
//! ```text
//!            set_path / set_goal ok
//!   ┌──────┐ ─────────────────────▶ ┌───────────┐  pause   ┌────────┐
//!   │ Idle │                        │ Following │ ───────▶ │ Paused │
//!   └──────┘ ◀───────────────────── └───────────┘ ◀─────── └────────┘
//!        goal reached / set_goal failed           resume
//! ```

use log::{debug, info};

use crate::core::WorldPoint;
use crate::pathfinding::{PathFailure, PathPlanner, PathResult};

/// Configuration for path following.
#[derive(Clone, Debug, PartialEq)]
pub struct FollowerConfig {
    /// Movement speed (world units per second)
    pub move_speed: f32,
    /// Distance at which a waypoint counts as reached (world units)
    pub arrival_tolerance: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            arrival_tolerance: 0.01,
        }
    }
}

/// State of path following.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowState {
    /// No path
    Idle,
    /// Advancing toward the current waypoint
    Following,
    /// Path and index kept, no movement
    Paused,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Nothing to follow
    Idle,
    /// Paused; the agent did not move
    Paused,
    /// Moved toward the current waypoint without reaching it
    Moving,
    /// Reached the waypoint at this index; the next one is now targeted
    WaypointReached(usize),
    /// Reached the last waypoint; the follower is idle again
    GoalReached,
}

/// Path follower for waypoint-based movement.
#[derive(Clone, Debug)]
pub struct PathFollower {
    config: FollowerConfig,
    position: WorldPoint,
    path: Vec<WorldPoint>,
    index: usize,
    state: FollowState,
}

impl PathFollower {
    /// Create an idle follower at `position`.
    pub fn new(config: FollowerConfig, position: WorldPoint) -> Self {
        Self {
            config,
            position,
            path: Vec::new(),
            index: 0,
            state: FollowState::Idle,
        }
    }

    /// Follower configuration
    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    /// Replace the current path and start following it from its first waypoint.
    ///
    /// An empty path leaves the follower idle.
    pub fn set_path(&mut self, path: Vec<WorldPoint>) {
        if path.is_empty() {
            debug!("[Follower] set_path: empty path, going idle");
            self.clear_path();
            return;
        }

        debug!("[Follower] set_path: {} waypoints", path.len());
        self.path = path;
        self.index = 0;
        self.state = FollowState::Following;
    }

    /// Drop the path and go idle.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.index = 0;
        self.state = FollowState::Idle;
    }

    /// Plan from the current position to `goal` and adopt the result.
    ///
    /// If the planner rejects the start, the ends of the current leg are
    /// tried next (see [`PathFollower::plan_origins`]). Returns the number of
    /// waypoints on success. On failure the previous path is discarded and
    /// the follower goes idle.
    pub fn set_goal<P: PathPlanner + ?Sized>(
        &mut self,
        goal: WorldPoint,
        planner: &P,
    ) -> Result<usize, PathFailure> {
        let mut result = planner.plan(self.position, goal);
        for origin in self.plan_origins().into_iter().skip(1) {
            if !result.failure_reason.is_some_and(|f| f.is_start_rejected()) {
                break;
            }
            debug!(
                "[Follower] start rejected, replanning from ({:.2},{:.2})",
                origin.x, origin.y
            );
            result = planner.plan(origin, goal);
        }
        self.adopt(result)
    }

    /// Positions a new plan may start from, most preferred first.
    ///
    /// Always begins with the agent's position. Mid-leg that position can
    /// round onto a cell that is neither end of the leg, so while a path is
    /// active the last reached waypoint and then the current target follow.
    pub fn plan_origins(&self) -> Vec<WorldPoint> {
        let mut origins = vec![self.position];
        if self.state == FollowState::Idle {
            return origins;
        }
        if let Some(&reached) = self.index.checked_sub(1).and_then(|i| self.path.get(i)) {
            origins.push(reached);
        }
        origins.extend(self.path.get(self.index).copied());
        origins
    }

    /// Take over the outcome of a search made elsewhere.
    pub fn adopt(&mut self, result: PathResult) -> Result<usize, PathFailure> {
        match result.into_result() {
            Ok(waypoints) => {
                let count = waypoints.len();
                self.set_path(waypoints);
                Ok(count)
            }
            Err(reason) => {
                debug!("[Follower] no path ({}), stopping", reason);
                self.clear_path();
                Err(reason)
            }
        }
    }

    /// Suspend movement, keeping path and index. No effect unless following.
    pub fn pause(&mut self) {
        if self.state == FollowState::Following {
            self.state = FollowState::Paused;
        }
    }

    /// Continue from the same waypoint. No effect unless paused.
    pub fn resume(&mut self) {
        if self.state == FollowState::Paused {
            self.state = FollowState::Following;
        }
    }

    /// Pause when following, resume when paused.
    pub fn toggle_pause(&mut self) {
        match self.state {
            FollowState::Following => self.state = FollowState::Paused,
            FollowState::Paused => self.state = FollowState::Following,
            FollowState::Idle => {}
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// Moves toward the current waypoint by at most `move_speed * dt`. At
    /// most one waypoint is reached per tick.
    pub fn tick(&mut self, dt: f32) -> TickEvent {
        match self.state {
            FollowState::Idle => return TickEvent::Idle,
            FollowState::Paused => return TickEvent::Paused,
            FollowState::Following => {}
        }

        let Some(&target) = self.path.get(self.index) else {
            self.clear_path();
            return TickEvent::Idle;
        };

        let max_delta = self.config.move_speed * dt.max(0.0);
        self.position = self.position.move_towards(target, max_delta);

        if self.position.distance(&target) > self.config.arrival_tolerance {
            return TickEvent::Moving;
        }

        self.position = target;
        let reached = self.index;
        if reached + 1 >= self.path.len() {
            info!(
                "[Follower] goal reached at ({:.2},{:.2})",
                target.x, target.y
            );
            self.clear_path();
            TickEvent::GoalReached
        } else {
            self.index += 1;
            TickEvent::WaypointReached(reached)
        }
    }

    /// Is the agent actively following a path?
    pub fn is_moving(&self) -> bool {
        self.state == FollowState::Following
    }

    /// Current state
    pub fn state(&self) -> FollowState {
        self.state
    }

    /// Agent position
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Teleport the agent. The path, if any, is kept.
    pub fn set_position(&mut self, position: WorldPoint) {
        self.position = position;
    }

    /// Waypoint currently being approached
    pub fn current_target(&self) -> Option<WorldPoint> {
        match self.state {
            FollowState::Idle => None,
            _ => self.path.get(self.index).copied(),
        }
    }

    /// Index of the waypoint currently being approached
    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    /// Final waypoint of the current path
    pub fn goal(&self) -> Option<WorldPoint> {
        self.path.last().copied()
    }

    /// Whole current path
    pub fn path(&self) -> &[WorldPoint] {
        &self.path
    }

    /// Waypoints not yet reached, starting with the current target.
    pub fn remaining_waypoints(&self) -> &[WorldPoint] {
        self.path.get(self.index..).unwrap_or(&[])
    }
}
