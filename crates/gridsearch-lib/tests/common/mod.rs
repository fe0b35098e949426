//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use gridsearch_lib::{load_grid, Grid, SearchResult};

/// Path to the fixture grids shared by the library and CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load a fixture grid by file name.
#[allow(dead_code)]
pub fn fixture_grid(name: &str) -> Grid {
    let path = fixtures_dir().join(name);
    load_grid(&path).unwrap_or_else(|err| panic!("load fixture {name}: {err}"))
}

/// Assert that a found path is walkable and satisfies the trip requirements.
#[allow(dead_code)]
pub fn assert_valid_path(grid: &Grid, result: &SearchResult) {
    let path = &result.path;
    assert!(result.solution_found(), "expected a solution: {result:?}");
    assert_eq!(path.first(), Some(&grid.start()), "path must begin at start");
    assert_eq!(path.last(), Some(&grid.goal()), "path must end at goal");
    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(pair[1]),
            "{} -> {} is not a single orthogonal move",
            pair[0],
            pair[1]
        );
    }
    for position in path {
        assert!(grid.is_passable(*position), "{position} is not passable");
    }
    if let Some(waypoint) = grid.waypoint() {
        assert!(
            path.contains(&waypoint),
            "path skips the way-point {waypoint}"
        );
    }
    assert_eq!(result.total_cost, grid.path_cost(path));
    assert_eq!(result.hop_count(), path.len() - 1);
}
