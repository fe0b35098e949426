use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::grid::{Grid, Position};

/// Handle of a node inside a [`NodeArena`].
pub type NodeId = usize;

/// State-space node: a position plus whether the way-point has been visited.
///
/// Two states that share a position but differ in `has_waypoint` are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SearchState {
    pub position: Position,
    pub has_waypoint: bool,
}

impl SearchState {
    /// State of an agent standing on `origin` before any move.
    ///
    /// Grids without a way-point start with the requirement already met.
    pub fn origin(grid: &Grid, origin: Position) -> Self {
        Self {
            position: origin,
            has_waypoint: grid.waypoint().map_or(true, |w| w == origin),
        }
    }

    /// State reached by stepping onto `next`. The flag never reverts.
    pub fn advance(self, grid: &Grid, next: Position) -> Self {
        Self {
            position: next,
            has_waypoint: self.has_waypoint || grid.waypoint() == Some(next),
        }
    }

    /// `true` when this state completes the whole trip.
    pub fn is_goal(self, grid: &Grid) -> bool {
        self.has_waypoint && self.position == grid.goal()
    }
}

/// Search tree node. Immutable once inserted into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub state: SearchState,
    /// `None` marks the root of a search leg.
    pub predecessor: Option<NodeId>,
    pub depth: usize,
    /// Cost accumulated from the root of the leg.
    pub cost: u32,
    /// Key the node was queued with (cost, or cost plus estimate).
    pub priority: u32,
}

impl SearchNode {
    /// Root node with no predecessor and zero accumulated cost.
    pub fn root(state: SearchState, depth: usize) -> Self {
        Self {
            state,
            predecessor: None,
            depth,
            cost: 0,
            priority: 0,
        }
    }
}

/// Append-only storage for search nodes.
///
/// Predecessor links are arena handles, so the search tree is a backward-only
/// DAG with no shared ownership.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(node.predecessor.map_or(true, |p| p < self.nodes.len()));
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk predecessor links back from `terminal` and return the positions
    /// from the leg root to `terminal`, inclusive.
    pub fn path_to(&self, terminal: NodeId) -> Vec<Position> {
        self.states_to(terminal)
            .into_iter()
            .map(|state| state.position)
            .collect()
    }

    /// States from the leg root to `terminal`, inclusive.
    ///
    /// The walk stops early if it ever revisits a node, so it terminates even
    /// if the arena were corrupted into a cycle.
    pub fn states_to(&self, terminal: NodeId) -> Vec<SearchState> {
        let mut states = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(terminal);
        while let Some(id) = current {
            if !seen.insert(id) {
                warn!(node = id, "predecessor cycle during path reconstruction");
                break;
            }
            let node = &self.nodes[id];
            states.push(node.state);
            current = node.predecessor;
        }
        states.reverse();
        states
    }
}
