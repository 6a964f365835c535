//! Star-map CLI library.
//!
//! Subcommand handlers, terminal styling, and output formatting for the
//! `starmap-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
