//! Main MargaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::GridBounds;
use crate::navigation::FollowerConfig;
use crate::pathfinding::AStarConfig;

use super::error::ConfigLoadError;
use super::follower::FollowerSection;
use super::grid::GridSection;
use super::pathfinding::PathfindingSection;

/// Full Marga configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MargaConfig {
    /// Lattice step and bounds
    #[serde(default)]
    pub grid: GridSection,

    /// Search settings
    #[serde(default)]
    pub pathfinding: PathfindingSection,

    /// Movement settings
    #[serde(default)]
    pub follower: FollowerSection,
}

impl MargaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/marga.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/marga.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the search or follower cannot work with.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let invalid = |msg: String| Err(ConfigLoadError::Invalid(msg));

        if !(self.grid.step.is_finite() && self.grid.step > 0.0) {
            return invalid(format!("grid.step must be positive, got {}", self.grid.step));
        }
        if !(0.0..=1.0).contains(&self.grid.closed_chance) {
            return invalid(format!(
                "grid.closed_chance must be within [0, 1], got {}",
                self.grid.closed_chance
            ));
        }
        if self.grid.bounded && (self.grid.width == 0 || self.grid.height == 0) {
            return invalid("bounded grid needs non-zero width and height".to_string());
        }
        if self.pathfinding.max_iterations == 0 {
            return invalid("pathfinding.max_iterations must be at least 1".to_string());
        }
        if !(self.follower.move_speed > 0.0) {
            return invalid(format!(
                "follower.move_speed must be positive, got {}",
                self.follower.move_speed
            ));
        }
        if !(self.follower.arrival_tolerance >= 0.0) {
            return invalid(format!(
                "follower.arrival_tolerance must not be negative, got {}",
                self.follower.arrival_tolerance
            ));
        }
        if !(self.follower.fixed_timestep > 0.0) {
            return invalid(format!(
                "follower.fixed_timestep must be positive, got {}",
                self.follower.fixed_timestep
            ));
        }
        Ok(())
    }

    /// Convert to AStarConfig
    pub fn to_astar_config(&self) -> AStarConfig {
        self.pathfinding.to_astar_config()
    }

    /// Convert to FollowerConfig
    pub fn to_follower_config(&self) -> FollowerConfig {
        self.follower.to_follower_config()
    }

    /// Search bounds, if the grid is bounded
    pub fn bounds(&self) -> Option<GridBounds> {
        self.grid.to_bounds()
    }
}
