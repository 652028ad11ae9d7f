//! Test utilities for Marga integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use marga::core::{Cell, CoordinateQuantizer, GridBounds};
use marga::obstacles::{ObstacleMap, RandomGrid};
use marga::pathfinding::Connectivity;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Initialize logging once per test binary.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Unbounded unit-step map with the given blocked cells.
pub fn unit_map(blocked: &[(i32, i32)]) -> ObstacleMap {
    ObstacleMap::from_cells(
        blocked.iter().map(|&(x, y)| Cell::new(x, y)),
        CoordinateQuantizer::default(),
        None,
    )
}

/// Seeded random bounded grid with (0, 0) kept open.
pub fn random_map(seed: u64, size: u32, closed_chance: f32) -> ObstacleMap {
    let mut rng = StdRng::seed_from_u64(seed);
    RandomGrid::new(size, size, closed_chance).generate(Cell::new(0, 0), &mut rng)
}

/// Reference shortest-path costs from `start` over a bounded map (plain Dijkstra).
pub fn dijkstra(map: &ObstacleMap, start: Cell, connectivity: Connectivity) -> HashMap<Cell, f32> {
    let bounds: GridBounds = map.bounds().expect("reference search needs a bounded map");
    let mut dist: HashMap<Cell, f32> = HashMap::new();
    let mut done: HashMap<Cell, bool> = HashMap::new();
    dist.insert(start, 0.0);

    loop {
        let next = dist
            .iter()
            .filter(|(c, _)| !done.contains_key(c))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(c, d)| (*c, *d));
        let Some((cell, d)) = next else { break };
        done.insert(cell, true);

        for &offset in connectivity.offsets() {
            let n = cell + offset;
            if !bounds.contains(n) || map.is_blocked(n) {
                continue;
            }
            let nd = d + offset.length();
            if dist.get(&n).is_none_or(|&old| nd < old) {
                dist.insert(n, nd);
            }
        }
    }
    dist
}
