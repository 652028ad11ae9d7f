//! A* pathfinding types.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Cell, WorldPoint};

/// Axis-aligned moves: up, down, left, right.
const OFFSETS_4: [Cell; 4] = [
    Cell::new(0, 1),
    Cell::new(0, -1),
    Cell::new(-1, 0),
    Cell::new(1, 0),
];

/// Axis-aligned moves followed by the diagonals.
const OFFSETS_8: [Cell; 8] = [
    Cell::new(0, 1),
    Cell::new(0, -1),
    Cell::new(-1, 0),
    Cell::new(1, 0),
    Cell::new(-1, -1),
    Cell::new(-1, 1),
    Cell::new(1, 1),
    Cell::new(1, -1),
];

/// Neighbor set used to expand a node.
///
/// Serialized as the number of neighbors (`4` or `8`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Connectivity {
    /// Cardinal moves only
    Four,
    /// Cardinal and diagonal moves
    #[default]
    Eight,
}

impl Connectivity {
    /// Neighbor offsets in expansion order.
    ///
    /// The order matters: with equal f costs it decides which of several
    /// equally short paths is returned.
    pub fn offsets(self) -> &'static [Cell] {
        match self {
            Connectivity::Four => &OFFSETS_4,
            Connectivity::Eight => &OFFSETS_8,
        }
    }

    /// Number of neighbors
    pub fn count(self) -> u8 {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }

    /// Is `offset` one of this neighbor set's moves?
    pub fn allows(self, offset: Cell) -> bool {
        self.offsets().contains(&offset)
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            other => Err(format!("connectivity must be 4 or 8, got {}", other)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(value: Connectivity) -> Self {
        value.count()
    }
}

/// A* pathfinding configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AStarConfig {
    /// 4- or 8-connected expansion
    pub connectivity: Connectivity,
    /// Maximum number of node expansions before giving up
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            max_iterations: 10_000,
        }
    }
}

impl AStarConfig {
    /// Create with a given connectivity
    pub fn with_connectivity(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            ..Default::default()
        }
    }

    /// Override the expansion cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Which end of the search an endpoint failure refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The agent's cell
    Start,
    /// The requested goal cell
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Why an endpoint cannot be searched from or to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointIssue {
    /// Cell is covered by an obstacle
    Blocked,
    /// Cell lies outside the map bounds
    OutOfBounds,
}

impl fmt::Display for EndpointIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointIssue::Blocked => write!(f, "blocked"),
            EndpointIssue::OutOfBounds => write!(f, "out of bounds"),
        }
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathFailure {
    /// Frontier exhausted before the goal was reached
    #[error("goal unreachable: frontier exhausted")]
    GoalUnreachable,

    /// Expansion cap hit while frontier nodes remained
    #[error("iteration cap exceeded after {cap} expansions")]
    IterationCapExceeded {
        /// The cap that was hit
        cap: usize,
    },

    /// Start or goal cannot take part in a search
    #[error("{endpoint} cell {cell} is {reason}")]
    InvalidEndpoint {
        /// Which endpoint
        endpoint: Endpoint,
        /// The offending cell
        cell: Cell,
        /// What is wrong with it
        reason: EndpointIssue,
    },
}

impl PathFailure {
    /// Short code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GoalUnreachable => "GOAL_UNREACHABLE",
            Self::IterationCapExceeded { .. } => "ITERATION_CAP",
            Self::InvalidEndpoint { .. } => "INVALID_ENDPOINT",
        }
    }

    /// Was the search refused because of its start cell?
    pub fn is_start_rejected(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint {
                endpoint: Endpoint::Start,
                ..
            }
        )
    }
}

/// Result of A* pathfinding
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Path as lattice cells, start to goal inclusive (empty if no path found)
    pub path_grid: Vec<Cell>,
    /// Path as world positions (filled by the planner)
    pub path_world: Vec<WorldPoint>,
    /// Total path cost in lattice units (g of the goal node)
    pub cost: f32,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a successful result
    pub(super) fn found(path_grid: Vec<Cell>, cost: f32, nodes_expanded: usize) -> Self {
        Self {
            path_grid,
            path_world: Vec::new(),
            cost,
            nodes_expanded,
            success: true,
            failure_reason: None,
        }
    }

    /// Create a failed result
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path_grid: Vec::new(),
            path_world: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Path length in cells
    pub fn length_cells(&self) -> usize {
        self.path_grid.len()
    }

    /// Path length in world units
    pub fn length_world(&self) -> f32 {
        self.path_world
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    /// Convert to a `Result`, keeping the world waypoints on success.
    pub fn into_result(self) -> Result<Vec<WorldPoint>, PathFailure> {
        match self.failure_reason {
            Some(reason) => Err(reason),
            None => Ok(self.path_world),
        }
    }
}

/// Expansion state of a search node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// Discovered, waiting on the frontier
    Open,
    /// Expanded; never revisited by this search
    Closed,
}

/// A node in the A* search arena
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Lattice cell
    pub cell: Cell,
    /// Cost from start
    pub g: f32,
    /// Heuristic estimate to goal
    pub h: f32,
    /// Arena index of the node this one was reached from (`None` for the start)
    pub parent: Option<usize>,
    /// Open or closed
    pub state: NodeState,
}

impl SearchNode {
    /// Priority: g + h
    #[inline]
    pub fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Frontier heap entry.
///
/// `index` is the node's arena index, which is also its insertion order.
/// Entries are invalidated lazily: one whose `g` no longer matches the
/// node's `g`, or whose node is closed, is skipped when popped.
#[derive(Clone, Copy, Debug)]
pub(super) struct OpenEntry {
    pub f: f32,
    pub g: f32,
    pub index: usize,
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; equal f pops the earliest inserted node
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_connectivity_offsets() {
        assert_eq!(Connectivity::Four.offsets().len(), 4);
        assert_eq!(Connectivity::Eight.offsets().len(), 8);
        assert!(Connectivity::Eight.allows(Cell::new(1, -1)));
        assert!(!Connectivity::Four.allows(Cell::new(1, -1)));
        assert_eq!(&Connectivity::Eight.offsets()[..4], Connectivity::Four.offsets());
    }

    #[test]
    fn test_connectivity_serde() {
        let c: Connectivity = serde_yaml::from_str("4").unwrap();
        assert_eq!(c, Connectivity::Four);
        assert_eq!(serde_yaml::to_string(&Connectivity::Eight).unwrap().trim(), "8");
        assert!(serde_yaml::from_str::<Connectivity>("6").is_err());
    }

    #[test]
    fn test_open_entry_min_heap_with_stable_ties() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f: 3.0, g: 1.0, index: 2 });
        heap.push(OpenEntry { f: 2.0, g: 1.0, index: 5 });
        heap.push(OpenEntry { f: 2.0, g: 1.0, index: 1 });
        heap.push(OpenEntry { f: 2.0, g: 1.0, index: 3 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![1, 3, 5, 2]);
    }

    #[test]
    fn test_failure_display_and_code() {
        let err = PathFailure::InvalidEndpoint {
            endpoint: Endpoint::Goal,
            cell: Cell::new(3, 0),
            reason: EndpointIssue::Blocked,
        };
        assert_eq!(err.to_string(), "goal cell (3, 0) is blocked");
        assert_eq!(err.code(), "INVALID_ENDPOINT");
        assert!(!err.is_start_rejected());
        assert!(!PathFailure::GoalUnreachable.is_start_rejected());
        assert!(
            PathFailure::InvalidEndpoint {
                endpoint: Endpoint::Start,
                cell: Cell::new(0, 0),
                reason: EndpointIssue::OutOfBounds,
            }
            .is_start_rejected()
        );
        assert_eq!(
            PathFailure::IterationCapExceeded { cap: 10 }.to_string(),
            "iteration cap exceeded after 10 expansions"
        );
    }

    #[test]
    fn test_failed_result() {
        let result = PathResult::failed(PathFailure::GoalUnreachable, 12);
        assert!(!result.success);
        assert_eq!(result.length_cells(), 0);
        assert_eq!(result.length_world(), 0.0);
        assert_eq!(result.into_result(), Err(PathFailure::GoalUnreachable));
    }
}
