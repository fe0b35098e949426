//! `search` command: run one strategy and print its result.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use gridsearch_lib::{run_search_with, Formulation, SearchLimits, SearchRequest, StrategyId};

use super::load_command_grid;
use crate::output::OutputFormat;
use crate::terminal::ColorPalette;

/// Arguments for the search command.
#[derive(Debug, Clone, Default)]
pub struct SearchCommandArgs {
    pub grid: Option<PathBuf>,
    pub strategy: StrategyId,
    /// `None` keeps the strategy's default formulation.
    pub formulation: Option<Formulation>,
    pub max_expansions: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl SearchCommandArgs {
    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> SearchRequest {
        let limits = SearchLimits {
            max_expansions: self.max_expansions,
            timeout: self.timeout_ms.map(Duration::from_millis),
        };
        let request = SearchRequest::new(self.strategy).with_limits(limits);
        match self.formulation {
            Some(formulation) => request.with_formulation(formulation),
            None => request,
        }
    }
}

/// Handle the search subcommand.
pub fn handle_search_command(format: OutputFormat, args: &SearchCommandArgs) -> Result<()> {
    let grid = load_command_grid(args.grid.as_deref())?;
    let result = run_search_with(&grid, &args.to_request())
        .with_context(|| format!("{} search could not start", args.strategy))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    format
        .write_search(&mut out, &grid, &result, &ColorPalette::detect())
        .context("failed to write search result")?;
    out.flush().context("failed to flush output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_limits_and_formulation() {
        let args = SearchCommandArgs {
            strategy: StrategyId::Dfs,
            formulation: Some(Formulation::Unified),
            max_expansions: Some(10),
            timeout_ms: Some(250),
            ..SearchCommandArgs::default()
        };
        let request = args.to_request();
        assert_eq!(request.strategy, StrategyId::Dfs);
        assert_eq!(request.formulation, Some(Formulation::Unified));
        assert_eq!(request.limits.max_expansions, Some(10));
        assert_eq!(request.limits.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn default_args_keep_strategy_defaults() {
        let request = SearchCommandArgs::default().to_request();
        assert_eq!(request.strategy, StrategyId::AStar);
        assert_eq!(request.formulation, None);
        assert_eq!(request.limits, SearchLimits::default());
    }
}
