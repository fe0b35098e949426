use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Traversal cost of a free (or unknown) cell.
pub const BASE_COST: u32 = 1;
/// Traversal cost of a medium-cost cell.
pub const MEDIUM_COST: u32 = 4;
/// Traversal cost of a heavy-cost cell.
pub const HEAVY_COST: u32 = 7;

/// Terrain type stored in a grid cell.
///
/// The integer codes match the grid text format: `0` free, `1` wall,
/// `2` start, `3` medium cost, `4` heavy cost, `5` way-point, `6` goal.
/// Any other code is kept as [`CellKind::Other`] and treated as free terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Free,
    Wall,
    Start,
    MediumCost,
    HeavyCost,
    Waypoint,
    Goal,
    Other(i64),
}

impl CellKind {
    /// Map an integer cell code to its kind.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => CellKind::Free,
            1 => CellKind::Wall,
            2 => CellKind::Start,
            3 => CellKind::MediumCost,
            4 => CellKind::HeavyCost,
            5 => CellKind::Waypoint,
            6 => CellKind::Goal,
            other => CellKind::Other(other),
        }
    }

    /// Integer code used by the grid text format.
    pub fn code(self) -> i64 {
        match self {
            CellKind::Free => 0,
            CellKind::Wall => 1,
            CellKind::Start => 2,
            CellKind::MediumCost => 3,
            CellKind::HeavyCost => 4,
            CellKind::Waypoint => 5,
            CellKind::Goal => 6,
            CellKind::Other(code) => code,
        }
    }

    /// Cost paid when entering a cell of this kind.
    pub fn cost(self) -> u32 {
        match self {
            CellKind::MediumCost => MEDIUM_COST,
            CellKind::HeavyCost => HEAVY_COST,
            _ => BASE_COST,
        }
    }

    /// Every kind except [`CellKind::Wall`] can be entered.
    pub fn is_passable(self) -> bool {
        self != CellKind::Wall
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Free => f.write_str("free"),
            CellKind::Wall => f.write_str("wall"),
            CellKind::Start => f.write_str("start"),
            CellKind::MediumCost => f.write_str("medium-cost"),
            CellKind::HeavyCost => f.write_str("heavy-cost"),
            CellKind::Waypoint => f.write_str("way-point"),
            CellKind::Goal => f.write_str("goal"),
            CellKind::Other(code) => write!(f, "code {}", code),
        }
    }
}

/// Zero-indexed `(row, col)` coordinate of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance to another position, saturating at `u32::MAX`.
    pub fn manhattan(self, other: Position) -> u32 {
        let distance = self
            .row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col));
        u32::try_from(distance).unwrap_or(u32::MAX)
    }

    /// `true` when `other` is one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    fn offset(self, direction: Direction, size: usize) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbour enumeration order. Searches rely on it as the tie-break
    /// between equal-priority expansions, so it must not change.
    pub const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(row, col)` delta of a single step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Immutable square grid with its resolved special cells.
///
/// A `Grid` is validated on construction and never mutated afterwards, so a
/// single instance can be shared by reference across concurrent searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellKind>,
    start: Position,
    waypoint: Option<Position>,
    goal: Position,
}

impl Grid {
    /// Build a grid from rows of integer cell codes.
    ///
    /// The rows must form a non-empty square containing exactly one start
    /// and one goal cell, and at most one way-point.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[i64]>,
    {
        let size = rows.len();
        if size == 0 {
            return Err(Error::EmptyGrid);
        }

        let expected = rows[0].as_ref().len();
        let mut cells = Vec::with_capacity(size * expected);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != expected {
                return Err(Error::RaggedRow {
                    row,
                    expected,
                    found: values.len(),
                });
            }
            cells.extend(values.iter().copied().map(CellKind::from_code));
        }
        if expected != size {
            return Err(Error::NotSquare {
                rows: size,
                cols: expected,
            });
        }

        let mut start = None;
        let mut waypoint = None;
        let mut goal = None;
        for (index, kind) in cells.iter().enumerate() {
            let slot = match kind {
                CellKind::Start => &mut start,
                CellKind::Waypoint => &mut waypoint,
                CellKind::Goal => &mut goal,
                _ => continue,
            };
            let position = Position::new(index / size, index % size);
            if let Some(first) = *slot {
                return Err(Error::DuplicateCell {
                    kind: *kind,
                    first,
                    second: position,
                });
            }
            *slot = Some(position);
        }

        Ok(Self {
            size,
            cells,
            start: start.ok_or(Error::MissingCell {
                kind: CellKind::Start,
            })?,
            waypoint,
            goal: goal.ok_or(Error::MissingCell {
                kind: CellKind::Goal,
            })?,
        })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Mandatory intermediate stop, if the grid defines one.
    pub fn waypoint(&self) -> Option<Position> {
        self.waypoint
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    /// `true` when the position lies inside the grid.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    /// Cell kind at `position`, or `None` when out of bounds.
    pub fn cell(&self, position: Position) -> Option<CellKind> {
        self.contains(position)
            .then(|| self.cells[position.row * self.size + position.col])
    }

    /// Cost of entering the cell at `position`.
    ///
    /// Out-of-bounds positions fall back to the base cost; callers only ask
    /// about positions produced by [`Grid::neighbours`].
    pub fn cost(&self, position: Position) -> u32 {
        self.cell(position).map_or(BASE_COST, CellKind::cost)
    }

    /// `true` when the position is in bounds and not a wall.
    pub fn is_passable(&self, position: Position) -> bool {
        self.cell(position).is_some_and(CellKind::is_passable)
    }

    /// In-bounds, passable neighbours of `position` in Up, Right, Down, Left
    /// order.
    pub fn neighbours(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ORDER
            .into_iter()
            .filter_map(move |direction| position.offset(direction, self.size))
            .filter(move |next| self.is_passable(*next))
    }

    /// Summed entry cost of every cell after the first one in `path`.
    pub fn path_cost(&self, path: &[Position]) -> u32 {
        path.iter().skip(1).map(|p| self.cost(*p)).sum()
    }

    /// Iterate over the rows as slices of cell kinds.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid<const N: usize>(rows: [[i64; N]; N]) -> Result<Grid> {
        Grid::from_rows(&rows)
    }

    fn scenario() -> Grid {
        grid([
            [0, 0, 0, 0],
            [0, 1, 1, 0],
            [0, 1, 5, 3],
            [2, 4, 6, 1],
        ])
        .expect("valid grid")
    }

    #[test]
    fn manhattan_distance_saturates() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.manhattan(Position::new(3, 4)), 7);
        assert_eq!(Position::new(3, 4).manhattan(origin), 7);
        assert_eq!(origin.manhattan(Position::new(usize::MAX, 0)), u32::MAX);
        assert_eq!(
            origin.manhattan(Position::new(usize::MAX, usize::MAX)),
            u32::MAX
        );
    }

    #[test]
    fn cost_table_matches_cell_codes() {
        assert_eq!(CellKind::from_code(0).cost(), 1);
        assert_eq!(CellKind::from_code(2).cost(), 1);
        assert_eq!(CellKind::from_code(3).cost(), 4);
        assert_eq!(CellKind::from_code(4).cost(), 7);
        assert_eq!(CellKind::from_code(5).cost(), 1);
        assert_eq!(CellKind::from_code(6).cost(), 1);
        assert_eq!(CellKind::from_code(42).cost(), 1);
    }

    #[test]
    fn only_walls_are_impassable() {
        assert!(!CellKind::Wall.is_passable());
        assert!(CellKind::HeavyCost.is_passable());
        assert!(CellKind::Other(-3).is_passable());
    }

    #[test]
    fn codes_round_trip_through_kind() {
        for code in 0..=7 {
            assert_eq!(CellKind::from_code(code).code(), code);
        }
    }

    #[test]
    fn resolves_special_cells() {
        let grid = scenario();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.start(), Position::new(3, 0));
        assert_eq!(grid.waypoint(), Some(Position::new(2, 2)));
        assert_eq!(grid.goal(), Position::new(3, 2));
    }

    #[test]
    fn neighbours_follow_up_right_down_left() {
        let grid = grid([[0, 0, 0], [0, 2, 0], [0, 6, 0]]).unwrap();
        let around: Vec<_> = grid.neighbours(Position::new(1, 1)).collect();
        assert_eq!(
            around,
            vec![
                Position::new(0, 1),
                Position::new(1, 2),
                Position::new(2, 1),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        let grid = scenario();
        let around: Vec<_> = grid.neighbours(Position::new(3, 0)).collect();
        assert_eq!(around, vec![Position::new(2, 0), Position::new(3, 1)]);

        let corner: Vec<_> = grid.neighbours(Position::new(0, 3)).collect();
        assert_eq!(corner, vec![Position::new(1, 3), Position::new(0, 2)]);
    }

    #[test]
    fn path_cost_excludes_origin() {
        let grid = scenario();
        let path = [
            Position::new(3, 0),
            Position::new(3, 1),
            Position::new(3, 2),
        ];
        assert_eq!(grid.path_cost(&path), 7 + 1);
        assert_eq!(grid.path_cost(&path[..1]), 0);
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows: Vec<Vec<i64>> = vec![vec![2, 0], vec![6]];
        let err = Grid::from_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_non_square() {
        let err = Grid::from_rows(&[[2i64, 0, 6]]).unwrap_err();
        assert!(matches!(err, Error::NotSquare { rows: 1, cols: 3 }));
    }

    #[test]
    fn rejects_missing_goal() {
        let err = grid([[2, 0], [0, 5]]).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCell {
                kind: CellKind::Goal
            }
        ));
    }

    #[test]
    fn rejects_duplicate_waypoint() {
        let err = grid([[2, 5], [5, 6]]).unwrap_err();
        match err {
            Error::DuplicateCell {
                kind,
                first,
                second,
            } => {
                assert_eq!(kind, CellKind::Waypoint);
                assert_eq!(first, Position::new(0, 1));
                assert_eq!(second, Position::new(1, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn waypoint_is_optional() {
        let grid = grid([[2, 0], [0, 6]]).unwrap();
        assert_eq!(grid.waypoint(), None);
    }
}
