//! A* planner over an obstacle map.

use log::trace;

use crate::core::{Cell, WorldPoint};
use crate::obstacles::ObstacleMap;
use crate::pathfinding::PathPlanner;

use super::search::AStarSearch;
use super::types::{AStarConfig, PathResult};

/// A* pathfinder bound to one obstacle map snapshot.
///
/// Start and goal are quantized with the map's own step, so both ends of a
/// search always share the same lattice.
pub struct AStarPlanner<'a> {
    map: &'a ObstacleMap,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(map: &'a ObstacleMap, config: AStarConfig) -> Self {
        Self { map, config }
    }

    /// Create with default configuration
    pub fn with_defaults(map: &'a ObstacleMap) -> Self {
        Self::new(map, AStarConfig::default())
    }

    /// Planner configuration
    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Map being searched
    pub fn map(&self) -> &ObstacleMap {
        self.map
    }

    /// Find a path from start to goal (grid coordinates)
    pub fn find_path(&self, start: Cell, goal: Cell) -> PathResult {
        let mut search = AStarSearch::new(self.config.clone());
        self.find_path_with(&mut search, start, goal)
    }

    /// Find a path from start to goal (world coordinates)
    pub fn find_path_world(&self, start: WorldPoint, goal: WorldPoint) -> PathResult {
        let quantizer = self.map.quantizer();
        let start_cell = quantizer.to_cell(start);
        let goal_cell = quantizer.to_cell(goal);
        trace!(
            "[AStar] find_path_world: ({:.2},{:.2}) -> ({:.2},{:.2}) as {} -> {}",
            start.x, start.y, goal.x, goal.y, start_cell, goal_cell
        );
        self.find_path(start_cell, goal_cell)
    }

    /// Grid search reusing a caller-owned [`AStarSearch`].
    ///
    /// The search keeps its open/closed state afterwards, which is what a
    /// debug overlay wants to draw. The planner's configuration is used, not
    /// the search's.
    pub fn find_path_with(&self, search: &mut AStarSearch, start: Cell, goal: Cell) -> PathResult {
        let mut result = search.run_with_offsets(
            start,
            goal,
            self.config.connectivity.offsets(),
            self.map,
            self.config.max_iterations,
        );

        if result.success {
            let quantizer = self.map.quantizer();
            result.path_world = result
                .path_grid
                .iter()
                .map(|&cell| quantizer.to_world(cell))
                .collect();
        }
        result
    }
}

impl PathPlanner for AStarPlanner<'_> {
    fn plan(&self, start: WorldPoint, goal: WorldPoint) -> PathResult {
        self.find_path_world(start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CoordinateQuantizer, GridBounds};
    use crate::obstacles::ObstacleShape;
    use crate::pathfinding::astar::{Connectivity, Endpoint, EndpointIssue, PathFailure};
    use approx::assert_relative_eq;

    fn four() -> AStarConfig {
        AStarConfig::with_connectivity(Connectivity::Four)
    }

    #[test]
    fn test_world_path_on_unit_grid() {
        let map = ObstacleMap::default();
        let planner = AStarPlanner::new(&map, four());

        let result = planner.find_path_world(WorldPoint::new(0.1, -0.2), WorldPoint::new(2.9, 0.3));

        assert!(result.success);
        assert_eq!(result.path_world.len(), 4);
        assert_eq!(result.path_world[0], WorldPoint::new(0.0, 0.0));
        assert_eq!(result.path_world[3], WorldPoint::new(3.0, 0.0));
        assert_relative_eq!(result.length_world(), 3.0);
    }

    #[test]
    fn test_precision_grid_scales_world_path() {
        let map = ObstacleMap::new(CoordinateQuantizer::new(0.5), None);
        let planner = AStarPlanner::new(&map, four());

        let result = planner.find_path_world(WorldPoint::ZERO, WorldPoint::new(1.5, 0.0));

        assert!(result.success);
        assert_eq!(result.length_cells(), 4);
        // Cost is in lattice units, length in world units
        assert_relative_eq!(result.cost, 3.0);
        assert_relative_eq!(result.length_world(), 1.5);
        assert_eq!(result.path_world[1], WorldPoint::new(0.5, 0.0));
    }

    #[test]
    fn test_path_around_shape() {
        let wall = ObstacleShape::new(WorldPoint::new(3.0, 0.0), WorldPoint::new(0.4, 2.4));
        let map = ObstacleMap::build(&[wall], CoordinateQuantizer::default(), None);
        let planner = AStarPlanner::with_defaults(&map);

        let result = planner.find_path(Cell::new(0, 0), Cell::new(6, 0));

        assert!(result.success);
        assert!(result.path_grid.iter().all(|&c| map.is_open(c)));
        assert!(result.path_grid.iter().any(|c| c.y.abs() >= 3));
    }

    #[test]
    fn test_goal_outside_bounds() {
        let map = ObstacleMap::new(CoordinateQuantizer::default(), Some(GridBounds::from_size(5, 5)));
        let planner = AStarPlanner::with_defaults(&map);

        let result = planner.find_path(Cell::new(0, 0), Cell::new(9, 0));

        assert_eq!(
            result.failure_reason,
            Some(PathFailure::InvalidEndpoint {
                endpoint: Endpoint::Goal,
                cell: Cell::new(9, 0),
                reason: EndpointIssue::OutOfBounds,
            })
        );
        assert!(result.path_world.is_empty());
    }

    #[test]
    fn test_start_outside_bounds() {
        let map = ObstacleMap::from_cells(
            [Cell::new(2, 2)],
            CoordinateQuantizer::default(),
            Some(GridBounds::from_size(5, 5)),
        );
        let planner = AStarPlanner::with_defaults(&map);

        // The start is reported even though the goal is blocked too
        let result = planner.find_path(Cell::new(-1, 0), Cell::new(2, 2));

        assert!(!result.success);
        assert_eq!(
            result.failure_reason,
            Some(PathFailure::InvalidEndpoint {
                endpoint: Endpoint::Start,
                cell: Cell::new(-1, 0),
                reason: EndpointIssue::OutOfBounds,
            })
        );
        assert_eq!(result.nodes_expanded, 0);

        let world = planner.find_path_world(WorldPoint::new(0.0, 5.2), WorldPoint::new(1.0, 1.0));
        assert_eq!(
            world.failure_reason.map(|f| f.code()),
            Some("INVALID_ENDPOINT")
        );
    }

    #[test]
    fn test_find_path_with_keeps_search_state() {
        let map = ObstacleMap::default();
        let planner = AStarPlanner::new(&map, four());
        let mut search = AStarSearch::default();

        let result = planner.find_path_with(&mut search, Cell::new(0, 0), Cell::new(2, 2));

        assert!(result.success);
        assert_eq!(search.nodes_expanded(), result.nodes_expanded);
        assert!(search.closed_cells().count() > 0);
    }

    #[test]
    fn test_planner_trait() {
        let map = ObstacleMap::default();
        let planner = AStarPlanner::new(&map, four());
        let dyn_planner: &dyn PathPlanner = &planner;

        let result = dyn_planner.plan(WorldPoint::ZERO, WorldPoint::new(0.0, 2.0));
        assert!(result.success);
        assert_eq!(result.path_world.last(), Some(&WorldPoint::new(0.0, 2.0)));
    }
}
