//! Way-point aware search over a [`Grid`].
//!
//! This module provides:
//! - [`StrategyId`] - Supported strategies (BFS, UCS, A*, DFS)
//! - [`Formulation`] - Two-phase restart or unified `(position, has_waypoint)` state
//! - [`SearchLimits`] / [`SearchRequest`] - Per-run options
//! - [`SearchResult`] - Outcome and statistics of one run
//! - [`run_search`] / [`run_search_with`] - Entry points
//!
//! # Strategy Pattern
//!
//! Each strategy is a [`SearchStrategy`] implementation that only chooses a
//! frontier container and an estimate function. The expansion loop, closed
//! set, budget checks and path reconstruction are shared.
//!
//! # Example
//!
//! ```
//! use gridsearch_lib::{run_search, Grid, StrategyId};
//!
//! let grid = Grid::parse("2 0 5\n0 1 0\n0 0 6\n")?;
//! let result = run_search(&grid, StrategyId::AStar);
//! assert!(result.solution_found());
//! assert_eq!(result.total_cost, 4);
//! # Ok::<(), gridsearch_lib::Error>(())
//! ```

mod engine;
mod heuristic;
mod planner;

pub use heuristic::estimate;
pub use planner::{
    select_strategy, AStarSearch, BreadthFirstSearch, DepthFirstSearch, SearchStrategy,
    UniformCostSearch,
};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Grid, Position};

/// Supported search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    /// Breadth-first search (unweighted, hop-optimal).
    Bfs,
    /// Uniform-cost search / Dijkstra (cost-optimal).
    Ucs,
    /// A* search with a Manhattan way-point estimate (cost-optimal).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Depth-first search (neither hop- nor cost-optimal).
    Dfs,
}

impl StrategyId {
    /// Every strategy, in selector-code order.
    pub const ALL: [StrategyId; 4] = [
        StrategyId::Bfs,
        StrategyId::Ucs,
        StrategyId::Dfs,
        StrategyId::AStar,
    ];

    /// Resolve the integer selector used by grid front-ends:
    /// `1` BFS, `2` UCS, `3` DFS, `4` A*.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(StrategyId::Bfs),
            2 => Ok(StrategyId::Ucs),
            3 => Ok(StrategyId::Dfs),
            4 => Ok(StrategyId::AStar),
            other => Err(Error::UnknownStrategy {
                value: other.to_string(),
            }),
        }
    }

    /// `true` for strategies whose reported cost is the minimum possible.
    pub fn is_cost_optimal(self) -> bool {
        matches!(self, StrategyId::Ucs | StrategyId::AStar)
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            StrategyId::Bfs => "bfs",
            StrategyId::Ucs => "ucs",
            StrategyId::AStar => "a-star",
            StrategyId::Dfs => "dfs",
        };
        f.write_str(value)
    }
}

impl FromStr for StrategyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(StrategyId::Bfs),
            "ucs" | "uniform-cost" | "dijkstra" => Ok(StrategyId::Ucs),
            "a-star" | "astar" | "a*" => Ok(StrategyId::AStar),
            "dfs" | "depth-first" => Ok(StrategyId::Dfs),
            other => match other.parse::<i64>() {
                Ok(code) => StrategyId::from_code(code),
                Err(_) => Err(Error::UnknownStrategy {
                    value: s.to_string(),
                }),
            },
        }
    }
}

/// How the "way-point, then goal" requirement is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formulation {
    /// Search to the way-point, then restart from it towards the goal.
    Phased,
    /// Single search over `(position, has_waypoint)` states.
    Unified,
}

impl fmt::Display for Formulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formulation::Phased => f.write_str("phased"),
            Formulation::Unified => f.write_str("unified"),
        }
    }
}

/// Optional bounds on a single run, checked before every expansion.
///
/// Reaching the goal never counts against the budget: a run that needs
/// exactly `max_expansions` expansions still reports `Found`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Expand at most this many nodes.
    pub max_expansions: Option<usize>,
    /// Stop once this much wall-clock time has elapsed.
    pub timeout: Option<Duration>,
}

impl SearchLimits {
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Full set of options for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub strategy: StrategyId,
    /// Overrides the strategy's default formulation when set.
    pub formulation: Option<Formulation>,
    /// Overrides the grid's start cell when set.
    pub origin: Option<Position>,
    pub limits: SearchLimits,
}

impl SearchRequest {
    pub fn new(strategy: StrategyId) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_formulation(mut self, formulation: Formulation) -> Self {
        self.formulation = Some(formulation);
        self
    }

    pub fn with_origin(mut self, origin: Position) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// The goal was reached after visiting the way-point.
    Found,
    /// The frontier emptied first; the goal is unreachable.
    NoSolution,
    /// A [`SearchLimits`] bound stopped the run before it finished.
    BudgetExceeded,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStatus::Found => f.write_str("found"),
            SearchStatus::NoSolution => f.write_str("no solution"),
            SearchStatus::BudgetExceeded => f.write_str("budget exceeded"),
        }
    }
}

/// Outcome and statistics of one search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub strategy: StrategyId,
    pub formulation: Formulation,
    pub status: SearchStatus,
    /// Positions from the origin to the goal; empty unless `Found`.
    pub path: Vec<Position>,
    /// Nodes popped from the frontier and expanded, over all legs.
    pub expanded_nodes: usize,
    /// Largest depth among popped nodes.
    pub max_depth: usize,
    /// Summed entry cost of every path cell after the origin.
    pub total_cost: u32,
    #[serde(rename = "elapsed_us", serialize_with = "serialize_micros")]
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn solution_found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Number of moves in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Index of the first path element standing on `waypoint`.
    pub fn waypoint_index(&self, waypoint: Position) -> Option<usize> {
        self.path.iter().position(|p| *p == waypoint)
    }

    /// Compare everything except the elapsed time.
    pub fn same_outcome(&self, other: &SearchResult) -> bool {
        self.strategy == other.strategy
            && self.formulation == other.formulation
            && self.status == other.status
            && self.path == other.path
            && self.expanded_nodes == other.expanded_nodes
            && self.max_depth == other.max_depth
            && self.total_cost == other.total_cost
    }
}

fn serialize_micros<S>(elapsed: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
}

/// Run `strategy` from the grid's start cell with default options.
pub fn run_search(grid: &Grid, strategy: StrategyId) -> SearchResult {
    let planner = select_strategy(strategy);
    planner.explore(
        grid,
        grid.start(),
        planner.default_formulation(),
        &SearchLimits::default(),
    )
}

/// Run a search with explicit options.
///
/// Fails only on input errors (an origin outside the grid or on a wall);
/// an unreachable goal is reported through [`SearchResult::status`].
pub fn run_search_with(grid: &Grid, request: &SearchRequest) -> Result<SearchResult> {
    let origin = request.origin.unwrap_or_else(|| grid.start());
    if !grid.is_passable(origin) {
        return Err(Error::InvalidOrigin { origin });
    }

    let planner = select_strategy(request.strategy);
    let formulation = request
        .formulation
        .unwrap_or_else(|| planner.default_formulation());
    debug!(
        strategy = %request.strategy,
        %formulation,
        %origin,
        "running search"
    );
    Ok(planner.explore(grid, origin, formulation, &request.limits))
}
