mod common;

use gridsearch_lib::{
    run_search, run_search_with, Formulation, Position, SearchLimits, SearchRequest,
    SearchStatus, StrategyId,
};

use common::{assert_valid_path, fixture_grid};

fn positions(cells: &[(usize, usize)]) -> Vec<Position> {
    cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
}

#[test]
fn forced_corridor_is_found_by_every_strategy() {
    let grid = fixture_grid("corridor.txt");
    let expected = positions(&[(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0)]);

    for id in StrategyId::ALL {
        let result = run_search(&grid, id);
        assert_eq!(result.strategy, id);
        assert_eq!(result.path, expected, "{id}");
        assert_eq!(result.total_cost, 4 + 1 + 7 + 1 + 1 + 1, "{id}");
        assert_eq!(result.max_depth, 6, "{id}");
    }
}

#[test]
fn bfs_on_open_scenario_takes_the_direct_route() {
    let grid = fixture_grid("scenario_4x4.txt");
    let result = run_search(&grid, StrategyId::Bfs);
    assert_eq!(result.path, positions(&[(3, 0), (3, 1), (3, 2)]));
    assert_eq!(result.total_cost, 2);
    assert_eq!(result.expanded_nodes, 4);
    assert_eq!(result.max_depth, 2);
}

#[test]
fn bfs_walks_around_the_walls_when_the_bottom_row_is_blocked() {
    let grid = fixture_grid("walled_4x4.txt");
    let result = run_search(&grid, StrategyId::Bfs);
    assert_eq!(
        result.path,
        positions(&[
            (3, 0),
            (2, 0),
            (1, 0),
            (0, 0),
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 3),
            (2, 3),
            (2, 2),
            (3, 2),
        ])
    );
    assert_eq!(result.total_cost, 10);
    assert_eq!(result.max_depth, 10);
}

#[test]
fn a_star_revisits_cells_after_the_waypoint() {
    let grid = fixture_grid("backtrack.txt");
    let result = run_search(&grid, StrategyId::AStar);
    assert_eq!(result.formulation, Formulation::Unified);
    assert_eq!(
        result.path,
        positions(&[(1, 0), (1, 1), (2, 1), (3, 1), (2, 1), (1, 1), (1, 2), (1, 3)])
    );
    assert_eq!(result.total_cost, 7);
    assert_eq!(result.waypoint_index(Position::new(3, 1)), Some(3));
    assert_eq!(result.expanded_nodes, 7);
}

#[test]
fn phased_and_unified_agree_on_cost_for_optimal_strategies() {
    let grid = fixture_grid("reference_10x10.txt");
    for id in [StrategyId::Ucs, StrategyId::AStar] {
        let phased = run_search_with(
            &grid,
            &SearchRequest::new(id).with_formulation(Formulation::Phased),
        )
        .unwrap();
        let unified = run_search_with(
            &grid,
            &SearchRequest::new(id).with_formulation(Formulation::Unified),
        )
        .unwrap();
        assert_eq!(phased.total_cost, unified.total_cost, "{id}");
        assert_eq!(phased.formulation, Formulation::Phased);
        assert_eq!(unified.formulation, Formulation::Unified);
    }
}

#[test]
fn unreachable_goal_reports_no_solution() {
    let grid = fixture_grid("unreachable.txt");
    for id in StrategyId::ALL {
        let result = run_search(&grid, id);
        assert_eq!(result.status, SearchStatus::NoSolution, "{id}");
        assert!(result.path.is_empty());
        assert_eq!(result.total_cost, 0);
        assert!(result.expanded_nodes > 0);
    }
}

#[test]
fn expansion_budget_stops_the_search() {
    let grid = fixture_grid("reference_10x10.txt");
    let request = SearchRequest::new(StrategyId::Ucs)
        .with_limits(SearchLimits::default().with_max_expansions(1));
    let result = run_search_with(&grid, &request).unwrap();
    assert_eq!(result.status, SearchStatus::BudgetExceeded);
    assert_eq!(result.expanded_nodes, 1);
    assert!(result.path.is_empty());
    assert!(!result.solution_found());
}

#[test]
fn zero_timeout_stops_the_search() {
    let grid = fixture_grid("reference_10x10.txt");
    let request = SearchRequest::new(StrategyId::AStar)
        .with_limits(SearchLimits::default().with_timeout(std::time::Duration::ZERO));
    let result = run_search_with(&grid, &request).unwrap();
    assert_eq!(result.status, SearchStatus::BudgetExceeded);
}

#[test]
fn custom_origin_starts_the_search_elsewhere() {
    let grid = fixture_grid("corridor.txt");
    let request = SearchRequest::new(StrategyId::Bfs).with_origin(Position::new(2, 2));
    let result = run_search_with(&grid, &request).unwrap();
    assert_eq!(result.path, positions(&[(2, 2), (2, 1), (2, 0)]));
    assert_eq!(result.total_cost, 2);
}

#[test]
fn reference_grid_solutions_are_valid() {
    let grid = fixture_grid("reference_10x10.txt");
    for id in StrategyId::ALL {
        assert_valid_path(&grid, &run_search(&grid, id));
    }
}
