//! Follower configuration section.

use serde::{Deserialize, Serialize};

use crate::navigation::FollowerConfig;

use super::defaults;

/// Follower configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FollowerSection {
    /// World units per second
    #[serde(default = "defaults::move_speed")]
    pub move_speed: f32,

    /// Waypoint arrival distance (world units)
    #[serde(default = "defaults::arrival_tolerance")]
    pub arrival_tolerance: f32,

    /// Seconds per tick when driven by the CLI
    #[serde(default = "defaults::fixed_timestep")]
    pub fixed_timestep: f32,
}

impl Default for FollowerSection {
    fn default() -> Self {
        Self {
            move_speed: defaults::move_speed(),
            arrival_tolerance: defaults::arrival_tolerance(),
            fixed_timestep: defaults::fixed_timestep(),
        }
    }
}

impl FollowerSection {
    /// Convert to FollowerConfig
    pub fn to_follower_config(&self) -> FollowerConfig {
        FollowerConfig {
            move_speed: self.move_speed,
            arrival_tolerance: self.arrival_tolerance,
        }
    }
}
