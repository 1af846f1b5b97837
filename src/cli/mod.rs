//! CLI module for LazyTimer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting and display logic
//! - `terminal`: The `run` front-end (surface host and stdin commands)

pub mod commands;
pub mod display;
pub mod terminal;

pub use commands::{ActionArgs, Cli, Commands, RunArgs};
pub use display::Display;
pub use terminal::{parse_input, run, Input, TerminalHost};
