//! Configuration loading for Marga.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//! Every field is optional.
//!
//! ```rust,ignore
//! use marga::config::MargaConfig;
//!
//! // Load from default path (configs/marga.yaml), defaults if absent
//! let config = MargaConfig::load_default()?;
//!
//! let astar = config.to_astar_config();
//! let follower = config.to_follower_config();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Lattice step, optional bounds, random grid density |
//! | [`PathfindingSection`] | Connectivity and expansion cap |
//! | [`FollowerSection`] | Speed, arrival tolerance, tick length |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   step: 0.5          # precision grid: two cells per world unit
//!   bounded: true
//!   width: 40
//!   height: 40
//! pathfinding:
//!   connectivity: 8
//!   max_iterations: 10000
//! follower:
//!   move_speed: 10.0
//!   fixed_timestep: 0.02
//! ```

mod defaults;
mod error;
mod follower;
mod grid;
mod marga;
mod pathfinding;

pub use error::ConfigLoadError;
pub use marga::MargaConfig;

pub use follower::FollowerSection;
pub use grid::GridSection;
pub use pathfinding::PathfindingSection;
