//! Handlers for the CLI subcommands.
//!
//! `main.rs` parses arguments and dispatches here; each handler loads its
//! grid, calls into the library, and renders through [`crate::output`].

pub mod check;
pub mod compare;
pub mod search;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gridsearch_lib::{load_grid, Grid};

/// Environment variable consulted when `--grid` is omitted.
pub const GRID_ENV_VAR: &str = "GRIDSEARCH_GRID";

/// Resolve the grid path from the flag, falling back to [`GRID_ENV_VAR`].
pub fn resolve_grid_path(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    match std::env::var_os(GRID_ENV_VAR) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => anyhow::bail!("no grid given: pass --grid <FILE> or set {}", GRID_ENV_VAR),
    }
}

/// Resolve and load the grid for a command.
pub fn load_command_grid(flag: Option<&Path>) -> Result<Grid> {
    let path = resolve_grid_path(flag)?;
    load_grid(&path).with_context(|| format!("failed to load grid from {}", path.display()))
}
