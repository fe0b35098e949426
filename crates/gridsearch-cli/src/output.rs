//! Output formatting for search results.
//!
//! Every renderer writes to an `io::Write` so the commands print to stdout
//! while tests capture into a buffer.

use std::io::{self, Write};
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use gridsearch_lib::{CellKind, Grid, Position, SearchResult, SearchStatus};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected with the global `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly report with a map of the path.
    #[default]
    Text,
    /// One line per path step, `+`/`|`/`-` prefixed.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

/// Static description of a grid, printed by `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub size: usize,
    pub start: Position,
    pub waypoint: Option<Position>,
    pub goal: Position,
    pub walls: usize,
    pub medium_cost: usize,
    pub heavy_cost: usize,
}

impl GridSummary {
    pub fn from_grid(grid: &Grid) -> Self {
        let count = |kind: CellKind| {
            grid.rows()
                .flat_map(|row| row.iter())
                .filter(|cell| **cell == kind)
                .count()
        };
        Self {
            size: grid.size(),
            start: grid.start(),
            waypoint: grid.waypoint(),
            goal: grid.goal(),
            walls: count(CellKind::Wall),
            medium_cost: count(CellKind::MediumCost),
            heavy_cost: count(CellKind::HeavyCost),
        }
    }
}

impl OutputFormat {
    /// Render a single search run.
    pub fn write_search<W: Write>(
        self,
        out: &mut W,
        grid: &Grid,
        result: &SearchResult,
        palette: &ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_search_text(out, grid, result, palette),
            OutputFormat::Basic => write_search_basic(out, result),
            OutputFormat::Json => write_json(out, result),
        }
    }

    /// Render one row per strategy.
    pub fn write_comparison<W: Write>(
        self,
        out: &mut W,
        results: &[SearchResult],
        palette: &ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_comparison_text(out, results, palette),
            OutputFormat::Basic => {
                for result in results {
                    writeln!(
                        out,
                        "{} {} cost={} moves={} expanded={}",
                        result.strategy,
                        result.status,
                        result.total_cost,
                        result.hop_count(),
                        result.expanded_nodes
                    )?;
                }
                Ok(())
            }
            OutputFormat::Json => write_json(out, &results),
        }
    }

    /// Render a validated grid.
    pub fn write_check<W: Write>(
        self,
        out: &mut W,
        grid: &Grid,
        palette: &ColorPalette,
    ) -> io::Result<()> {
        let summary = GridSummary::from_grid(grid);
        match self {
            OutputFormat::Text => {
                writeln!(
                    out,
                    "{}Grid OK{}: {}x{}",
                    palette.green, palette.reset, summary.size, summary.size
                )?;
                writeln!(out, "  start:     {}", summary.start)?;
                match summary.waypoint {
                    Some(waypoint) => writeln!(out, "  way-point: {}", waypoint)?,
                    None => writeln!(out, "  way-point: none")?,
                }
                writeln!(out, "  goal:      {}", summary.goal)?;
                writeln!(
                    out,
                    "  walls: {}, medium-cost: {}, heavy-cost: {}",
                    summary.walls, summary.medium_cost, summary.heavy_cost
                )?;
                writeln!(out)?;
                write_map(out, grid, &[], palette)
            }
            OutputFormat::Basic => writeln!(
                out,
                "{}x{} start={} waypoint={} goal={}",
                summary.size,
                summary.size,
                summary.start,
                summary
                    .waypoint
                    .map_or_else(|| "none".to_string(), |w| w.to_string()),
                summary.goal
            ),
            OutputFormat::Json => write_json(out, &summary),
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

fn write_search_text<W: Write>(
    out: &mut W,
    grid: &Grid,
    result: &SearchResult,
    palette: &ColorPalette,
) -> io::Result<()> {
    let via = grid
        .waypoint()
        .map(|w| format!(" via {}", w))
        .unwrap_or_default();

    match result.status {
        SearchStatus::Found => {
            writeln!(
                out,
                "Path from {}{} to {} ({} moves; strategy: {}, {}):",
                grid.start(),
                via,
                grid.goal(),
                result.hop_count(),
                result.strategy,
                result.formulation
            )?;
            let mut waypoint_tagged = false;
            let last = result.path.len().saturating_sub(1);
            for (index, position) in result.path.iter().enumerate() {
                let tag = if index == 0 {
                    Some(("STRT", palette.tag_start))
                } else if index == last {
                    Some(("GOAL", palette.tag_goal))
                } else if !waypoint_tagged && Some(*position) == grid.waypoint() {
                    waypoint_tagged = true;
                    Some(("WAYP", palette.tag_waypoint))
                } else {
                    None
                };
                match tag {
                    Some((label, color)) => {
                        writeln!(out, " {}{}{} {}", color, label, palette.reset, position)?
                    }
                    None => writeln!(out, "      {}", position)?,
                }
            }
            writeln!(out)?;
            write_map(out, grid, &result.path, palette)?;
            writeln!(out)?;
            writeln!(
                out,
                "Total cost: {}{}{}",
                palette.white_bold,
                format_with_separators(u64::from(result.total_cost)),
                palette.reset
            )?;
        }
        SearchStatus::NoSolution => {
            writeln!(
                out,
                "{}No path{} from {}{} to {} (strategy: {}, {})",
                palette.red,
                palette.reset,
                grid.start(),
                via,
                grid.goal(),
                result.strategy,
                result.formulation
            )?;
        }
        SearchStatus::BudgetExceeded => {
            writeln!(
                out,
                "{}Search stopped{}: budget exceeded (strategy: {}, {})",
                palette.red, palette.reset, result.strategy, result.formulation
            )?;
        }
    }

    writeln!(
        out,
        "{}Expanded nodes: {} | max depth: {} | elapsed: {}{}",
        palette.gray,
        format_with_separators(result.expanded_nodes as u64),
        result.max_depth,
        format_elapsed(result.elapsed),
        palette.reset
    )
}

fn write_search_basic<W: Write>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    if !result.solution_found() {
        return writeln!(
            out,
            "{} after {} expansions",
            result.status,
            result.expanded_nodes
        );
    }
    let len = result.path.len();
    for (i, position) in result.path.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        writeln!(out, "{} {}", prefix, position)?;
    }
    writeln!(
        out,
        "cost {} / {} expanded",
        result.total_cost, result.expanded_nodes
    )
}

fn write_comparison_text<W: Write>(
    out: &mut W,
    results: &[SearchResult],
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "{}{:<8} {:<9} {:<16} {:>6} {:>6} {:>9} {:>6} {:>10}{}",
        palette.white_bold,
        "STRATEGY",
        "FORM",
        "STATUS",
        "MOVES",
        "COST",
        "EXPANDED",
        "DEPTH",
        "ELAPSED",
        palette.reset
    )?;
    for result in results {
        let color = if result.solution_found() {
            palette.green
        } else {
            palette.red
        };
        writeln!(
            out,
            "{:<8} {:<9} {}{:<16}{} {:>6} {:>6} {:>9} {:>6} {:>10}",
            result.strategy.to_string(),
            result.formulation.to_string(),
            color,
            result.status.to_string(),
            palette.reset,
            result.hop_count(),
            result.total_cost,
            format_with_separators(result.expanded_nodes as u64),
            result.max_depth,
            format_elapsed(result.elapsed)
        )?;
    }
    Ok(())
}

/// Draw the grid, one character per cell, marking path cells with `*`.
///
/// `S`/`W`/`G` special cells, `#` wall, `m` medium cost, `h` heavy cost,
/// `.` free.
fn write_map<W: Write>(
    out: &mut W,
    grid: &Grid,
    path: &[Position],
    palette: &ColorPalette,
) -> io::Result<()> {
    for (row, cells) in grid.rows().enumerate() {
        let mut line = String::from("  ");
        for (col, kind) in cells.iter().enumerate() {
            if col > 0 {
                line.push(' ');
            }
            let on_path = path.contains(&Position::new(row, col));
            let (glyph, color) = match kind {
                CellKind::Start => ('S', palette.tag_start),
                CellKind::Waypoint => ('W', palette.tag_waypoint),
                CellKind::Goal => ('G', palette.tag_goal),
                _ if on_path => ('*', palette.cyan),
                CellKind::Wall => ('#', palette.gray),
                CellKind::MediumCost => ('m', palette.orange),
                CellKind::HeavyCost => ('h', palette.red),
                CellKind::Free | CellKind::Other(_) => ('.', ""),
            };
            if color.is_empty() {
                line.push(glyph);
            } else {
                line.push_str(color);
                line.push(glyph);
                line.push_str(palette.reset);
            }
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// `412µs`, `12.3ms` or `1.25s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    if micros < 1_000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", elapsed.as_secs_f64() * 1_000.0)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_lib::{run_search, StrategyId};

    fn grid() -> Grid {
        Grid::parse("2 3 0\n1 1 4\n6 0 5\n").expect("valid grid")
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).expect("render succeeds");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn text_output_tags_special_steps() {
        let grid = grid();
        let result = run_search(&grid, StrategyId::Bfs);
        let text = render(|out| {
            OutputFormat::Text.write_search(out, &grid, &result, &ColorPalette::plain())
        });
        assert!(text.contains(
            "Path from (0, 0) via (2, 2) to (2, 0) (6 moves; strategy: bfs, phased):"
        ));
        assert!(text.contains(" STRT (0, 0)"));
        assert!(text.contains(" WAYP (2, 2)"));
        assert!(text.contains(" GOAL (2, 0)"));
        assert!(text.contains("Total cost: 15"));
        assert!(text.contains("  S * *\n  # # *\n  G * W\n"));
    }

    #[test]
    fn basic_output_lists_positions() {
        let grid = grid();
        let result = run_search(&grid, StrategyId::Ucs);
        let text = render(|out| {
            OutputFormat::Basic.write_search(out, &grid, &result, &ColorPalette::plain())
        });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.first(), Some(&"+ (0, 0)"));
        assert_eq!(lines[6], "- (2, 0)");
        assert!(lines[7].starts_with("cost 15 / "));
    }

    #[test]
    fn failed_runs_use_status_display() {
        let grid = Grid::parse("2 1 0\n1 1 0\n0 0 6\n").expect("valid grid");
        let result = run_search(&grid, StrategyId::Bfs);
        let text = render(|out| {
            OutputFormat::Basic.write_search(out, &grid, &result, &ColorPalette::plain())
        });
        assert_eq!(text, "no solution after 1 expansions\n");

        let rows = render(|out| {
            OutputFormat::Basic.write_comparison(out, &[result.clone()], &ColorPalette::plain())
        });
        assert_eq!(rows, "bfs no solution cost=0 moves=0 expanded=1\n");

        let table = render(|out| {
            OutputFormat::Text.write_comparison(out, &[result], &ColorPalette::plain())
        });
        assert!(table.contains("bfs      phased    no solution     "));
    }

    #[test]
    fn json_output_is_parseable() {
        let grid = grid();
        let result = run_search(&grid, StrategyId::AStar);
        let text = render(|out| {
            OutputFormat::Json.write_search(out, &grid, &result, &ColorPalette::plain())
        });
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["status"], "found");
        assert_eq!(value["total_cost"], 15);
        assert_eq!(value["path"][0]["row"], 0);
    }

    #[test]
    fn check_summary_counts_terrain() {
        let summary = GridSummary::from_grid(&grid());
        assert_eq!(summary.walls, 2);
        assert_eq!(summary.medium_cost, 1);
        assert_eq!(summary.heavy_cost, 1);
        assert_eq!(summary.waypoint, Some(Position::new(2, 2)));
    }

    #[test]
    fn elapsed_uses_readable_units() {
        assert_eq!(format_elapsed(Duration::from_micros(412)), "412µs");
        assert_eq!(format_elapsed(Duration::from_micros(12_300)), "12.3ms");
        assert_eq!(format_elapsed(Duration::from_millis(1_250)), "1.25s");
    }
}
