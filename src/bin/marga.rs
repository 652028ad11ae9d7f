//! Marga - scripted pathfinding runs
//!
//! Plays a scenario file (or a random grid when none is given) at the
//! configured fixed timestep and logs the outcome.
//!
//! Usage:
//!   RUST_LOG=info cargo run --release -- --scenario scenarios/detour.yaml
//!   RUST_LOG=debug cargo run --release -- --seed 7 --max-ticks 2000

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use marga::config::{ConfigLoadError, MargaConfig};
use marga::core::{Cell, WorldPoint};
use marga::io::{Scenario, ScenarioError};
use marga::navigation::{PathFollower, TickEvent};
use marga::pathfinding::AStarPlanner;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults to configs/marga.yaml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Scenario file to play
    #[arg(short, long)]
    scenario: Option<String>,

    /// Maximum number of ticks
    #[arg(long, default_value = "10000")]
    max_ticks: usize,

    /// Seed for the random grid used when no scenario is given
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigLoadError),

    #[error("{0}")]
    Scenario(#[from] ScenarioError),
}

type Result<T> = std::result::Result<T, CliError>;

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            MargaConfig::load(Path::new(path))?
        }
        None => MargaConfig::load_default()?,
    };

    match &args.scenario {
        Some(path) => run_scenario(Path::new(path), &config, args.max_ticks),
        None => {
            run_random(&config, args.seed, args.max_ticks);
            Ok(())
        }
    }
}

fn run_scenario(path: &Path, config: &MargaConfig, max_ticks: usize) -> Result<()> {
    let scenario = Scenario::load(path)?;
    if !scenario.description.is_empty() {
        info!("{}", scenario.description);
    }

    let report = scenario.run(config, max_ticks)?;
    for (i, goal) in report.goals.iter().enumerate() {
        match goal {
            Ok(waypoints) => info!("goal #{}: {} waypoints", i, waypoints),
            Err(reason) => warn!("goal #{}: {} [{}]", i, reason, reason.code()),
        }
    }
    if report.truncated {
        warn!("tick budget of {} exhausted", max_ticks);
    }
    info!(
        "'{}': {} goals reached in {} ticks, final position ({:.2},{:.2})",
        report.name,
        report.goals_reached,
        report.ticks,
        report.final_position.x,
        report.final_position.y
    );
    Ok(())
}

/// Random unit grid from the agent's corner to the opposite one.
fn run_random(config: &MargaConfig, seed: u64, max_ticks: usize) {
    let grid = config.grid.to_random_grid();
    let start = Cell::new(0, 0);
    let goal = Cell::new(grid.width as i32 - 1, grid.height as i32 - 1);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut map = grid.generate(start, &mut rng);
    map.unblock(goal);

    let planner = AStarPlanner::new(&map, config.to_astar_config());
    let mut follower = PathFollower::new(config.to_follower_config(), WorldPoint::ZERO);

    let target = map.quantizer().to_world(goal);
    match follower.set_goal(target, &planner) {
        Ok(waypoints) => info!(
            "{}x{} grid (seed {}): {} blocked, path of {} waypoints",
            grid.width,
            grid.height,
            seed,
            map.len(),
            waypoints
        ),
        Err(reason) => {
            warn!("seed {}: no path to {} ({})", seed, goal, reason);
            return;
        }
    }

    let dt = config.follower.fixed_timestep;
    for tick in 1..=max_ticks {
        if follower.tick(dt) == TickEvent::GoalReached {
            info!("goal reached after {} ticks", tick);
            return;
        }
    }
    warn!(
        "tick budget of {} exhausted at waypoint {}",
        max_ticks,
        follower.waypoint_index()
    );
}
