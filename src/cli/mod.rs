//! Command-line interface for music-digest.
//!
//! This module provides CLI commands for fetching lyrics, music news and
//! charts, printing each result as JSON.

mod commands;

pub use commands::{Cli, Commands, run_command};
