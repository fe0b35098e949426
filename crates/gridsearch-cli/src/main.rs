use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridsearch_cli::commands::check::handle_check_command;
use gridsearch_cli::commands::compare::handle_compare_command;
use gridsearch_cli::commands::search::{handle_search_command, SearchCommandArgs};
use gridsearch_cli::output::OutputFormat;
use gridsearch_lib::{Formulation, StrategyId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Way-point aware grid pathfinding")]
struct Cli {
    /// Output format for command results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct GridArg {
    /// Grid file to load. Falls back to the GRIDSEARCH_GRID environment variable.
    #[arg(long)]
    grid: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one search strategy on a grid.
    Search {
        #[command(flatten)]
        grid: GridArg,
        /// Strategy name (bfs, ucs, dijkstra, a-star, dfs) or selector code (1-4).
        #[arg(long, default_value = "a-star")]
        strategy: StrategyId,
        /// Search the combined (position, has-way-point) state space in one pass.
        #[arg(long, conflicts_with = "phased")]
        unified: bool,
        /// Search to the way-point first, then restart towards the goal.
        #[arg(long)]
        phased: bool,
        /// Stop after expanding this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
        /// Stop after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Run every strategy on a grid and compare the results.
    Compare {
        #[command(flatten)]
        grid: GridArg,
    },
    /// Validate a grid file and describe it.
    Check {
        #[command(flatten)]
        grid: GridArg,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            grid,
            strategy,
            unified,
            phased,
            max_expansions,
            timeout_ms,
        } => {
            let formulation = if unified {
                Some(Formulation::Unified)
            } else if phased {
                Some(Formulation::Phased)
            } else {
                None
            };
            let args = SearchCommandArgs {
                grid: grid.grid,
                strategy,
                formulation,
                max_expansions,
                timeout_ms,
            };
            handle_search_command(cli.format, &args)
        }
        Command::Compare { grid } => handle_compare_command(cli.format, grid.grid.as_deref()),
        Command::Check { grid } => handle_check_command(cli.format, grid.grid.as_deref()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
