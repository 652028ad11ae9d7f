//! File-driven runs.
//!
//! - **Scenario parsing**: YAML scripted runs (obstacles, start, commands)
//! - **Playback**: drives a [`Navigator`](crate::navigation::Navigator) at a
//!   fixed timestep and reports the outcome
//!
//! ```rust,ignore
//! use marga::config::MargaConfig;
//! use marga::io::Scenario;
//! use std::path::Path;
//!
//! let scenario = Scenario::load(Path::new("scenarios/detour.yaml"))?;
//! let report = scenario.run(&MargaConfig::load_default()?, 10_000)?;
//! println!("reached {} goals", report.goals_reached);
//! ```

pub mod scenario;

pub use scenario::{Command, Scenario, ScenarioError, ScenarioReport};
