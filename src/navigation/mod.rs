//! Moving an agent along planned paths.
//!
//! - [`PathFollower`]: explicit `tick(dt)` waypoint follower with pause/resume
//! - [`Navigator`]: owns obstacle shapes and replans on every goal request

mod follower;
mod navigator;

pub use follower::{FollowState, FollowerConfig, PathFollower, TickEvent};
pub use navigator::Navigator;
