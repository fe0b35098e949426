use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::frontier::Frontier;
use crate::grid::{Grid, Position};
use crate::node::{NodeArena, NodeId, SearchNode, SearchState};

use super::{Formulation, SearchLimits, SearchResult, SearchStatus, StrategyId};

/// Target of a single search leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegGoal {
    /// Any state that has picked up the way-point.
    Waypoint,
    /// The goal cell with the way-point already visited.
    Destination,
}

impl LegGoal {
    fn is_met(self, grid: &Grid, state: SearchState) -> bool {
        match self {
            LegGoal::Waypoint => state.has_waypoint,
            LegGoal::Destination => state.is_goal(grid),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegOutcome {
    Reached(NodeId),
    Exhausted,
    Interrupted,
}

/// Statistics and limits shared by every leg of one run.
#[derive(Debug)]
struct Budget {
    max_expansions: Option<usize>,
    deadline: Option<Instant>,
    expanded: usize,
    max_depth: usize,
}

impl Budget {
    fn new(limits: &SearchLimits, started: Instant) -> Self {
        Self {
            max_expansions: limits.max_expansions,
            deadline: limits.timeout.and_then(|t| started.checked_add(t)),
            expanded: 0,
            max_depth: 0,
        }
    }

    fn is_spent(&self) -> bool {
        if let Some(limit) = self.max_expansions {
            if self.expanded >= limit {
                return true;
            }
        }
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Shared driver behind every strategy.
///
/// `make_frontier` supplies a fresh container per leg and `estimate` adds a
/// heuristic term to the queue priority (return `0` for uninformed search).
pub(crate) fn run<F, M, H>(
    grid: &Grid,
    origin: Position,
    strategy: StrategyId,
    formulation: Formulation,
    limits: &SearchLimits,
    make_frontier: M,
    estimate: H,
) -> SearchResult
where
    F: Frontier<NodeId>,
    M: Fn() -> F,
    H: Fn(&Grid, SearchState) -> u32,
{
    let started = Instant::now();
    let mut budget = Budget::new(limits, started);
    let mut arena = NodeArena::new();

    let origin_state = SearchState::origin(grid, origin);
    let legs: &[LegGoal] = match formulation {
        Formulation::Phased if !origin_state.has_waypoint => {
            &[LegGoal::Waypoint, LegGoal::Destination]
        }
        _ => &[LegGoal::Destination],
    };

    let mut seed = arena.insert(SearchNode {
        priority: estimate(grid, origin_state),
        ..SearchNode::root(origin_state, 0)
    });
    let mut path: Vec<Position> = Vec::new();
    let mut total_cost = 0;
    let mut status = SearchStatus::Found;

    for &goal in legs {
        debug!(
            %strategy,
            leg = ?goal,
            from = %arena.get(seed).state.position,
            "starting search leg"
        );
        let frontier = make_frontier();
        let reached = match explore(grid, &mut arena, seed, goal, frontier, &estimate, &mut budget) {
            LegOutcome::Reached(id) => id,
            LegOutcome::Exhausted => {
                status = SearchStatus::NoSolution;
                break;
            }
            LegOutcome::Interrupted => {
                warn!(
                    %strategy,
                    expanded = budget.expanded,
                    "search stopped by budget before reaching the goal"
                );
                status = SearchStatus::BudgetExceeded;
                break;
            }
        };

        let leg = arena.path_to(reached);
        let skip = usize::from(path.last().is_some_and(|last| leg.first() == Some(last)));
        path.extend_from_slice(&leg[skip..]);

        let node = *arena.get(reached);
        total_cost += node.cost;
        seed = arena.insert(SearchNode::root(node.state, node.depth));
    }

    if status == SearchStatus::Found {
        debug_assert_eq!(total_cost, grid.path_cost(&path));
    } else {
        path.clear();
        total_cost = 0;
    }

    let result = SearchResult {
        strategy,
        formulation,
        status,
        path,
        expanded_nodes: budget.expanded,
        max_depth: budget.max_depth,
        total_cost,
        elapsed: started.elapsed(),
    };
    debug!(
        %strategy,
        status = %result.status,
        expanded = result.expanded_nodes,
        cost = result.total_cost,
        nodes = arena.len(),
        "search finished"
    );
    result
}

/// Expand nodes from `seed` until `goal` is met, the frontier empties or the
/// budget runs out.
///
/// States are closed when popped. A popped state that is already closed is a
/// stale duplicate and is dropped without counting as an expansion. The
/// budget is checked only before a real expansion, so popping the goal always
/// succeeds.
fn explore<F, H>(
    grid: &Grid,
    arena: &mut NodeArena,
    seed: NodeId,
    goal: LegGoal,
    mut frontier: F,
    estimate: &H,
    budget: &mut Budget,
) -> LegOutcome
where
    F: Frontier<NodeId>,
    H: Fn(&Grid, SearchState) -> u32,
{
    let mut closed: HashSet<SearchState> = HashSet::new();
    frontier.insert(seed, arena.get(seed).priority);

    while let Some(id) = frontier.remove() {
        let node = *arena.get(id);
        if closed.contains(&node.state) {
            continue;
        }
        budget.max_depth = budget.max_depth.max(node.depth);
        if goal.is_met(grid, node.state) {
            return LegOutcome::Reached(id);
        }
        if budget.is_spent() {
            return LegOutcome::Interrupted;
        }

        closed.insert(node.state);
        budget.expanded += 1;
        trace!(
            position = %node.state.position,
            has_waypoint = node.state.has_waypoint,
            cost = node.cost,
            depth = node.depth,
            "expanding"
        );

        for next in grid.neighbours(node.state.position) {
            let state = node.state.advance(grid, next);
            if closed.contains(&state) {
                continue;
            }
            let cost = node.cost + grid.cost(next);
            let priority = cost + estimate(grid, state);
            let child = arena.insert(SearchNode {
                state,
                predecessor: Some(id),
                depth: node.depth + 1,
                cost,
                priority,
            });
            frontier.insert(child, priority);
        }
    }
    LegOutcome::Exhausted
}
