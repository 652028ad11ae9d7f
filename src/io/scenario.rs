//! Scenario YAML parsing and playback.
//!
//! A scenario defines a scripted run with:
//! - Obstacle rectangles
//! - Agent start position
//! - Optional configuration overrides
//! - Sequence of commands (goal, pause/resume, obstacle toggles, ticking)

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigLoadError, MargaConfig};
use crate::core::WorldPoint;
use crate::navigation::{Navigator, TickEvent};
use crate::obstacles::ObstacleShape;
use crate::pathfinding::PathFailure;

/// A scripted run loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable scenario name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Configuration used instead of the caller's, if present
    #[serde(default)]
    pub config: Option<MargaConfig>,

    /// Agent start position
    #[serde(default = "default_start")]
    pub start: WorldPoint,

    /// Obstacle rectangles, addressed by index in commands
    #[serde(default)]
    pub obstacles: Vec<ObstacleShape>,

    /// Sequence of commands
    pub commands: Vec<Command>,
}

fn default_start() -> WorldPoint {
    WorldPoint::ZERO
}

/// A scenario command
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Request a new goal (replans from the current position)
    Goal {
        /// Goal X (world units)
        x: f32,
        /// Goal Y (world units)
        y: f32,
    },
    /// Pause the follower
    Pause,
    /// Resume the follower
    Resume,
    /// Flip pause state
    TogglePause,
    /// Enable or disable an obstacle for later goals
    SetObstacleActive {
        /// Index into `obstacles`
        index: usize,
        /// New flag
        active: bool,
    },
    /// Advance the simulation
    Run {
        /// Number of ticks; omitted means until the follower stops moving
        #[serde(default)]
        ticks: Option<usize>,
    },
}

/// Error type for scenario loading and playback
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// I/O error reading file
    #[error("I/O error: {0}")]
    Io(String),
    /// YAML parsing error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Embedded configuration failed validation
    #[error("Scenario config: {0}")]
    Config(#[from] ConfigLoadError),
    /// Command refers to an obstacle that does not exist
    #[error("Unknown obstacle {index} ({count} defined)")]
    UnknownObstacle {
        /// Requested index
        index: usize,
        /// Number of obstacles in the scenario
        count: usize,
    },
}

/// Outcome of a scenario run
#[derive(Clone, Debug, Default)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Result of every `goal` command, in order
    pub goals: Vec<Result<usize, PathFailure>>,
    /// Number of times the agent arrived at a goal
    pub goals_reached: usize,
    /// Number of waypoints reached (excluding final arrivals)
    pub waypoints_reached: usize,
    /// Ticks executed
    pub ticks: usize,
    /// Agent position after the last command
    pub final_position: WorldPoint,
    /// Whether a `run` stopped on the tick budget rather than on its own
    pub truncated: bool,
}

impl Scenario {
    /// Load scenario from YAML file
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ScenarioError> {
        let scenario: Self =
            serde_yaml::from_str(yaml).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        if let Some(config) = &scenario.config {
            config.validate()?;
        }
        Ok(scenario)
    }

    /// Configuration to run with: the scenario's own, else `fallback`.
    pub fn effective_config<'a>(&'a self, fallback: &'a MargaConfig) -> &'a MargaConfig {
        self.config.as_ref().unwrap_or(fallback)
    }

    /// Play the commands in order.
    ///
    /// `max_ticks` bounds the total number of ticks across all `run`
    /// commands.
    pub fn run(
        &self,
        fallback: &MargaConfig,
        max_ticks: usize,
    ) -> Result<ScenarioReport, ScenarioError> {
        let config = self.effective_config(fallback);
        let dt = config.follower.fixed_timestep;
        let mut nav =
            Navigator::from_config(config, self.start).with_obstacles(self.obstacles.clone());

        let mut report = ScenarioReport {
            name: self.name.clone(),
            ..Default::default()
        };

        info!(
            "[Scenario] '{}': {} obstacles, {} commands, dt={}",
            self.name,
            self.obstacles.len(),
            self.commands.len(),
            dt
        );

        for command in &self.commands {
            debug!("[Scenario] {:?}", command);
            match command {
                Command::Goal { x, y } => {
                    report.goals.push(nav.set_goal(WorldPoint::new(*x, *y)));
                }
                Command::Pause => nav.pause(),
                Command::Resume => nav.resume(),
                Command::TogglePause => nav.toggle_pause(),
                Command::SetObstacleActive { index, active } => {
                    if !nav.set_obstacle_active(*index, *active) {
                        return Err(ScenarioError::UnknownObstacle {
                            index: *index,
                            count: self.obstacles.len(),
                        });
                    }
                }
                Command::Run { ticks } => {
                    Self::run_ticks(&mut nav, *ticks, dt, max_ticks, &mut report);
                }
            }
        }

        report.final_position = nav.position();
        info!(
            "[Scenario] '{}' done: {} ticks, {}/{} goals reached, at ({:.2},{:.2})",
            self.name,
            report.ticks,
            report.goals_reached,
            report.goals.len(),
            report.final_position.x,
            report.final_position.y
        );
        Ok(report)
    }

    fn run_ticks(
        nav: &mut Navigator,
        ticks: Option<usize>,
        dt: f32,
        max_ticks: usize,
        report: &mut ScenarioReport,
    ) {
        let budget = max_ticks.saturating_sub(report.ticks);
        let wanted = ticks.unwrap_or(budget);
        let allowed = wanted.min(budget);
        if wanted > budget {
            report.truncated = true;
        }

        for _ in 0..allowed {
            if ticks.is_none() && !nav.follower().is_moving() {
                return;
            }
            report.ticks += 1;
            match nav.tick(dt) {
                TickEvent::GoalReached => report.goals_reached += 1,
                TickEvent::WaypointReached(_) => report.waypoints_reached += 1,
                TickEvent::Idle | TickEvent::Paused | TickEvent::Moving => {}
            }
        }

        if ticks.is_none() && nav.follower().is_moving() {
            report.truncated = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathfinding::Connectivity;

    #[test]
    fn test_parse_scenario() {
        let yaml = r#"
name: "Detour"
start: {x: 0.0, y: 0.0}
obstacles:
  - center: {x: 1.5, y: 0.0}
    half_extents: {x: 0.5, y: 0.4}
commands:
  - type: goal
    x: 3.0
    y: 0.0
  - type: run
  - type: set_obstacle_active
    index: 0
    active: false
  - type: run
    ticks: 10
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.name, "Detour");
        assert_eq!(scenario.obstacles.len(), 1);
        assert!(scenario.obstacles[0].active);
        assert_eq!(scenario.commands[0], Command::Goal { x: 3.0, y: 0.0 });
        assert_eq!(scenario.commands[1], Command::Run { ticks: None });
        assert_eq!(scenario.commands[3], Command::Run { ticks: Some(10) });
        assert!(scenario.config.is_none());
    }

    #[test]
    fn test_config_override() {
        let yaml = r#"
name: "Cardinal"
config:
  pathfinding:
    connectivity: 4
commands: []
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        let fallback = MargaConfig::default();
        let config = scenario.effective_config(&fallback);
        assert_eq!(config.pathfinding.connectivity, Connectivity::Four);
        assert_eq!(config.follower.move_speed, 10.0);
    }

    #[test]
    fn test_run_to_goal() {
        let yaml = r#"
name: "Straight"
commands:
  - type: goal
    x: 3.0
    y: 0.0
  - type: run
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        let report = scenario.run(&MargaConfig::default(), 10_000).unwrap();

        assert_eq!(report.goals, vec![Ok(4)]);
        assert_eq!(report.goals_reached, 1);
        assert_eq!(report.final_position, WorldPoint::new(3.0, 0.0));
        assert!(!report.truncated);
    }

    #[test]
    fn test_tick_budget_truncates() {
        let yaml = r#"
name: "Long"
commands:
  - type: goal
    x: 100.0
    y: 0.0
  - type: run
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        let report = scenario.run(&MargaConfig::default(), 5).unwrap();

        assert_eq!(report.ticks, 5);
        assert!(report.truncated);
        assert_eq!(report.goals_reached, 0);
    }

    #[test]
    fn test_unknown_obstacle() {
        let yaml = r#"
name: "Bad index"
commands:
  - type: set_obstacle_active
    index: 2
    active: false
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        let err = scenario.run(&MargaConfig::default(), 10).unwrap_err();
        assert_eq!(err, ScenarioError::UnknownObstacle { index: 2, count: 0 });
    }

    #[test]
    fn test_invalid_embedded_config() {
        let yaml = "name: x\nconfig:\n  follower:\n    move_speed: 0.0\ncommands: []\n";
        let err = Scenario::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ScenarioError::Config(ConfigLoadError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        let err = Scenario::from_yaml("name: [").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));

        let err = Scenario::from_yaml("name: x\ncommands:\n  - type: fly\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }
}
