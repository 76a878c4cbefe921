//! CLI Adapter
//!
//! Command-line interface for QuoteVerse.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    execute, failure_guidance, BrowseCmd, CliApp, Command, SavedCmd, ToggleCmd,
};
