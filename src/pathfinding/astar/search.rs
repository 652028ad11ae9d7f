//! Arena-based A* search.
//!
//! Nodes live in a flat arena; parents are arena indices. The frontier is a
//! binary heap of `(f, insertion index)` entries. Improving a frontier node
//! rewrites its arena slot in place and pushes a fresh heap entry under the
//! same index, so ties keep resolving by first insertion. Superseded entries
//! are dropped when popped.

use std::collections::{BinaryHeap, HashMap};

use log::{debug, trace};

use crate::core::Cell;
use crate::obstacles::Occupancy;

use super::types::{
    AStarConfig, Endpoint, EndpointIssue, NodeState, OpenEntry, PathFailure, PathResult,
    SearchNode,
};

/// Run one search with explicit parameters.
///
/// `offsets` is the neighbor set in expansion order; `iteration_cap` bounds
/// the number of expansions.
pub fn search<O: Occupancy + ?Sized>(
    start: Cell,
    goal: Cell,
    offsets: &[Cell],
    occupancy: &O,
    iteration_cap: usize,
) -> PathResult {
    AStarSearch::default().run_with_offsets(start, goal, offsets, occupancy, iteration_cap)
}

/// Reusable A* search state.
///
/// Holds the arena of the most recent run so it can be inspected afterwards
/// (frontier and expanded cells for debug overlays). Each run clears it.
#[derive(Debug, Default)]
pub struct AStarSearch {
    config: AStarConfig,
    nodes: Vec<SearchNode>,
    index_of: HashMap<Cell, usize>,
    open: BinaryHeap<OpenEntry>,
    open_count: usize,
    nodes_expanded: usize,
}

impl AStarSearch {
    /// Create with the given configuration
    pub fn new(config: AStarConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Configuration used by [`AStarSearch::run`]
    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Search using the configured connectivity and cap.
    pub fn run<O: Occupancy + ?Sized>(
        &mut self,
        start: Cell,
        goal: Cell,
        occupancy: &O,
    ) -> PathResult {
        let offsets = self.config.connectivity.offsets();
        let cap = self.config.max_iterations;
        self.run_with_offsets(start, goal, offsets, occupancy, cap)
    }

    /// Search with an explicit neighbor set and expansion cap.
    pub fn run_with_offsets<O: Occupancy + ?Sized>(
        &mut self,
        start: Cell,
        goal: Cell,
        offsets: &[Cell],
        occupancy: &O,
        iteration_cap: usize,
    ) -> PathResult {
        trace!("[AStar] search: start={} goal={} cap={}", start, goal, iteration_cap);
        self.reset();

        if let Err(failure) = Self::check_endpoint(Endpoint::Start, start, occupancy)
            .and_then(|()| Self::check_endpoint(Endpoint::Goal, goal, occupancy))
        {
            debug!("[AStar] FAILED: {} ({})", failure.code(), failure);
            return PathResult::failed(failure, 0);
        }

        self.insert(start, 0.0, start.distance(&goal), None);

        if start == goal {
            trace!("[AStar] start equals goal");
            return PathResult::found(vec![start], 0.0, 0);
        }

        let mut iterations = 0;
        while iterations < iteration_cap {
            let Some(entry) = self.open.pop() else {
                break;
            };
            let node = &self.nodes[entry.index];
            if node.state == NodeState::Closed || node.g != entry.g {
                // Superseded by a cheaper entry for the same node
                continue;
            }

            let current = entry.index;
            let current_cell = node.cell;
            let current_g = node.g;
            self.nodes[current].state = NodeState::Closed;
            self.open_count -= 1;

            for &offset in offsets {
                let Some(candidate) = current_cell.checked_add(offset) else {
                    continue;
                };
                let existing = self.index_of.get(&candidate).copied();
                if existing.is_some_and(|i| self.nodes[i].state == NodeState::Closed) {
                    continue;
                }
                if occupancy.is_blocked(candidate) {
                    continue;
                }

                let g = current_g + current_cell.distance(&candidate);

                if candidate == goal {
                    let tail = self.insert(goal, g, 0.0, Some(current));
                    self.nodes_expanded = iterations + 1;
                    let path = self.reconstruct(tail);
                    trace!(
                        "[AStar] found path: {} cells, cost {:.3}, {} expansions",
                        path.len(),
                        g,
                        self.nodes_expanded
                    );
                    return PathResult::found(path, g, self.nodes_expanded);
                }

                match existing {
                    None => {
                        self.insert(candidate, g, candidate.distance(&goal), Some(current));
                    }
                    Some(index) if g < self.nodes[index].g => {
                        let node = &mut self.nodes[index];
                        node.g = g;
                        node.parent = Some(current);
                        let f = node.f();
                        self.open.push(OpenEntry { f, g, index });
                    }
                    Some(_) => {}
                }
            }

            iterations += 1;
        }

        self.nodes_expanded = iterations;
        let failure = if self.open_count > 0 {
            PathFailure::IterationCapExceeded { cap: iteration_cap }
        } else {
            PathFailure::GoalUnreachable
        };
        debug!(
            "[AStar] FAILED: {} after expanding {} nodes",
            failure.code(),
            iterations
        );
        PathResult::failed(failure, iterations)
    }

    /// Cells still on the frontier after the last run, in insertion order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.state == NodeState::Open)
            .map(|n| n.cell)
    }

    /// Cells expanded by the last run.
    pub fn closed_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.state == NodeState::Closed)
            .map(|n| n.cell)
    }

    /// Search node for a cell visited by the last run.
    pub fn node(&self, cell: Cell) -> Option<&SearchNode> {
        self.index_of.get(&cell).map(|&i| &self.nodes[i])
    }

    /// Full arena of the last run; index 0 is the start.
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Expansions performed by the last run
    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.index_of.clear();
        self.open.clear();
        self.open_count = 0;
        self.nodes_expanded = 0;
    }

    fn check_endpoint<O: Occupancy + ?Sized>(
        endpoint: Endpoint,
        cell: Cell,
        occupancy: &O,
    ) -> Result<(), PathFailure> {
        let reason = if !occupancy.in_bounds(cell) {
            EndpointIssue::OutOfBounds
        } else if occupancy.is_blocked(cell) {
            EndpointIssue::Blocked
        } else {
            return Ok(());
        };
        Err(PathFailure::InvalidEndpoint {
            endpoint,
            cell,
            reason,
        })
    }

    /// Add a node to the arena and the frontier.
    fn insert(&mut self, cell: Cell, g: f32, h: f32, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(SearchNode {
            cell,
            g,
            h,
            parent,
            state: NodeState::Open,
        });
        self.index_of.insert(cell, index);
        self.open.push(OpenEntry { f: g + h, g, index });
        self.open_count += 1;
        index
    }

    /// Walk parent links from `tail` back to the start.
    fn reconstruct(&self, tail: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut current = Some(tail);
        while let Some(index) = current {
            let node = &self.nodes[index];
            path.push(node.cell);
            current = node.parent;
        }
        path.reverse();
        path
    }
}
