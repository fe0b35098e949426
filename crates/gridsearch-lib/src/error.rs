use std::path::PathBuf;

use thiserror::Error;

use crate::grid::{CellKind, Position};

/// Convenient result alias for the gridsearch library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant is an input error: a search that simply fails to reach its
/// goal is reported through [`crate::SearchStatus`], never through `Error`.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid file could not be located at the resolved path.
    #[error("grid file not found at {path}")]
    GridNotFound { path: PathBuf },

    /// A token in the grid text was not an integer cell code.
    #[error("invalid cell code '{token}' at line {line}, column {column}")]
    GridParse {
        line: usize,
        column: usize,
        token: String,
    },

    /// The grid text contained no rows.
    #[error("grid is empty")]
    EmptyGrid,

    /// A row had a different number of cells than the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Grids must be square.
    #[error("grid must be square, got {rows} rows by {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    /// A mandatory special cell is absent.
    #[error("grid has no {kind} cell")]
    MissingCell { kind: CellKind },

    /// A special cell that must be unique appears more than once.
    #[error("grid has more than one {kind} cell: {first} and {second}")]
    DuplicateCell {
        kind: CellKind,
        first: Position,
        second: Position,
    },

    /// Raised when a strategy selector does not name a known strategy.
    #[error("unknown search strategy: {value}{}", format_choices())]
    UnknownStrategy { value: String },

    /// Raised when a search origin lies outside the grid or on a wall.
    #[error("search origin {origin} is not a passable cell of the grid")]
    InvalidOrigin { origin: Position },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_choices() -> String {
    format!(
        ". Expected one of: {}",
        crate::search::StrategyId::ALL
            .iter()
            .map(|s| format!("'{}'", s))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
