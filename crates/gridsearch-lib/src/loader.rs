use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;

impl Grid {
    /// Parse the whitespace-separated text format: one row per non-blank
    /// line, one integer cell code per token.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<i64>> = Vec::new();
        for (line_index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .enumerate()
                .map(|(column, token)| {
                    token.parse::<i64>().map_err(|_| Error::GridParse {
                        line: line_index + 1,
                        column: column + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Grid::from_rows(&rows)
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Grid::parse(s)
    }
}

/// Load and validate a grid from a text file.
pub fn load_grid(path: &Path) -> Result<Grid> {
    if !path.exists() {
        return Err(Error::GridNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let grid = Grid::parse(&text)?;
    debug!(
        path = %path.display(),
        size = grid.size(),
        waypoint = grid.waypoint().is_some(),
        "loaded grid"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let grid: Grid = "2 0 0\n\n0 1 5\n0 0 6\n".parse().expect("valid grid");
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.waypoint(), Some(Position::new(1, 2)));
        assert_eq!(grid.goal(), Position::new(2, 2));
    }

    #[test]
    fn tolerates_tabs_and_trailing_whitespace() {
        let grid = Grid::parse("2\t0  \n 0 6\t\n").expect("valid grid");
        assert_eq!(grid.goal(), Position::new(1, 1));
    }

    #[test]
    fn reports_location_of_bad_token() {
        let err = Grid::parse("2 0\n0 x\n").unwrap_err();
        match err {
            Error::GridParse {
                line,
                column,
                token,
            } => {
                assert_eq!((line, column), (2, 2));
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_text_is_empty_grid() {
        assert!(matches!(Grid::parse("\n  \n"), Err(Error::EmptyGrid)));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_grid(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, Error::GridNotFound { .. }));
        assert!(format!("{err}").contains("absent.txt"));
    }

    #[test]
    fn loads_grid_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("grid.txt");
        fs::write(&path, "2 5\n0 6\n").expect("write grid");
        let grid = load_grid(&path).expect("grid loads");
        assert_eq!(grid.waypoint(), Some(Position::new(0, 1)));
    }
}
