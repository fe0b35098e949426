//! Gridsearch library entry points.
//!
//! This crate loads square cost grids, models the "visit the way-point, then
//! reach the goal" problem as a state space, and solves it with breadth-first,
//! uniform-cost, A* or depth-first search. Front-ends (the CLI, benchmarks)
//! should only depend on the functions exported here instead of
//! reimplementing behaviour.
//!

pub mod error;
pub mod frontier;
pub mod grid;
pub mod loader;
pub mod node;
pub mod search;

pub use error::{Error, Result};
pub use grid::{CellKind, Direction, Grid, Position};
pub use loader::load_grid;
pub use node::SearchState;
pub use search::{
    run_search, run_search_with, select_strategy, Formulation, SearchLimits, SearchRequest,
    SearchResult, SearchStatus, SearchStrategy, StrategyId,
};
