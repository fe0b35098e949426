//! Search strategies implementing the Strategy pattern.
//!
//! Each [`SearchStrategy`] picks a frontier container and an estimate
//! function and hands both to the shared expansion engine. Adding a strategy
//! means adding an implementation here and a branch in [`select_strategy`].

use crate::frontier::{FifoQueue, LifoStack, PriorityQueue};
use crate::grid::{Grid, Position};
use crate::node::SearchState;

use super::engine;
use super::heuristic::estimate;
use super::{Formulation, SearchLimits, SearchResult, StrategyId};

/// Trait for search strategies.
pub trait SearchStrategy: Send + Sync {
    /// The identifier reported in results.
    fn id(&self) -> StrategyId;

    /// Formulation used when a request does not choose one.
    fn default_formulation(&self) -> Formulation {
        Formulation::Phased
    }

    /// Search from `origin` to the grid's goal, visiting the way-point first.
    ///
    /// `origin` must be a passable cell; [`super::run_search_with`] checks
    /// that before calling in.
    fn explore(
        &self,
        grid: &Grid,
        origin: Position,
        formulation: Formulation,
        limits: &SearchLimits,
    ) -> SearchResult;
}

fn uninformed(_: &Grid, _: SearchState) -> u32 {
    0
}

/// Breadth-first search: fewest moves, cell costs ignored while searching.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

impl SearchStrategy for BreadthFirstSearch {
    fn id(&self) -> StrategyId {
        StrategyId::Bfs
    }

    fn explore(
        &self,
        grid: &Grid,
        origin: Position,
        formulation: Formulation,
        limits: &SearchLimits,
    ) -> SearchResult {
        engine::run(
            grid,
            origin,
            self.id(),
            formulation,
            limits,
            FifoQueue::new,
            uninformed,
        )
    }
}

/// Uniform-cost search (Dijkstra): cheapest path by summed entry cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCostSearch;

impl SearchStrategy for UniformCostSearch {
    fn id(&self) -> StrategyId {
        StrategyId::Ucs
    }

    fn explore(
        &self,
        grid: &Grid,
        origin: Position,
        formulation: Formulation,
        limits: &SearchLimits,
    ) -> SearchResult {
        engine::run(
            grid,
            origin,
            self.id(),
            formulation,
            limits,
            PriorityQueue::min,
            uninformed,
        )
    }
}

/// A* over `(position, has_waypoint)` states with a Manhattan estimate.
///
/// Defaults to the unified formulation, where the estimate routes through
/// the way-point until it has been visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarSearch;

impl SearchStrategy for AStarSearch {
    fn id(&self) -> StrategyId {
        StrategyId::AStar
    }

    fn default_formulation(&self) -> Formulation {
        Formulation::Unified
    }

    fn explore(
        &self,
        grid: &Grid,
        origin: Position,
        formulation: Formulation,
        limits: &SearchLimits,
    ) -> SearchResult {
        engine::run(
            grid,
            origin,
            self.id(),
            formulation,
            limits,
            PriorityQueue::min,
            estimate,
        )
    }
}

/// Depth-first search. Finds some path; no optimality guarantee.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl SearchStrategy for DepthFirstSearch {
    fn id(&self) -> StrategyId {
        StrategyId::Dfs
    }

    fn explore(
        &self,
        grid: &Grid,
        origin: Position,
        formulation: Formulation,
        limits: &SearchLimits,
    ) -> SearchResult {
        engine::run(
            grid,
            origin,
            self.id(),
            formulation,
            limits,
            LifoStack::new,
            uninformed,
        )
    }
}

/// Select the implementation registered for `id`.
pub fn select_strategy(id: StrategyId) -> Box<dyn SearchStrategy> {
    match id {
        StrategyId::Bfs => Box::new(BreadthFirstSearch),
        StrategyId::Ucs => Box::new(UniformCostSearch),
        StrategyId::AStar => Box::new(AStarSearch),
        StrategyId::Dfs => Box::new(DepthFirstSearch),
    }
}
