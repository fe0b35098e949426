//! `compare` command: run every strategy against the same grid.

use std::io::{self, Write};
use std::path::Path;
use std::thread;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use gridsearch_lib::{run_search, Grid, SearchResult, StrategyId};

use super::load_command_grid;
use crate::output::OutputFormat;
use crate::terminal::ColorPalette;

/// Run every registered strategy on its own scoped thread.
///
/// The grid is borrowed by all threads; results come back in
/// [`StrategyId::ALL`] order.
pub fn compare_strategies(grid: &Grid) -> Result<Vec<SearchResult>> {
    thread::scope(|scope| {
        let handles: Vec<_> = StrategyId::ALL
            .iter()
            .map(|&id| (id, scope.spawn(move || run_search(grid, id))))
            .collect();

        handles
            .into_iter()
            .map(|(id, handle)| {
                handle
                    .join()
                    .map_err(|_| anyhow!("{} search thread panicked", id))
            })
            .collect()
    })
}

/// Handle the compare subcommand.
pub fn handle_compare_command(format: OutputFormat, grid_path: Option<&Path>) -> Result<()> {
    let grid = load_command_grid(grid_path)?;
    let results = compare_strategies(&grid)?;
    debug!(strategies = results.len(), "comparison finished");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    format
        .write_comparison(&mut out, &results, &ColorPalette::detect())
        .context("failed to write comparison")?;
    out.flush().context("failed to flush output")
}
