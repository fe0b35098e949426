//! Gridsearch CLI library.
//!
//! Command handlers, output renderers and terminal styling for the
//! `gridsearch-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
