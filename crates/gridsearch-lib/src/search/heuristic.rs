use crate::grid::Grid;
use crate::node::SearchState;

/// Manhattan lower bound on the remaining cost from `state`.
///
/// Before the way-point is visited the estimate routes through it:
/// `d(p, W) + d(W, G)`. Afterwards it is `d(p, G)`. Every move costs at
/// least one, so the estimate never overshoots and it is consistent across
/// the flag flip.
pub fn estimate(grid: &Grid, state: SearchState) -> u32 {
    match grid.waypoint() {
        Some(waypoint) if !state.has_waypoint => {
            state.position.manhattan(waypoint) + waypoint.manhattan(grid.goal())
        }
        _ => state.position.manhattan(grid.goal()),
    }
}
