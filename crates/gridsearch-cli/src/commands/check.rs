//! `check` command: validate a grid file without searching it.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::load_command_grid;
use crate::output::OutputFormat;
use crate::terminal::ColorPalette;

pub fn handle_check_command(format: OutputFormat, grid_path: Option<&Path>) -> Result<()> {
    let grid = load_command_grid(grid_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    format
        .write_check(&mut out, &grid, &ColorPalette::detect())
        .context("failed to write grid summary")?;
    out.flush().context("failed to flush output")
}
