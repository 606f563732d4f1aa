//! Command line Toggl timer library.
//!
//! This crate provides the CLI interface for tgl.

mod cli;
pub mod commands;
mod config;
mod console;

pub use cli::{Cli, Commands};
pub use config::{Config, DEFAULT_PROJECT_FILE, load_project_settings};
pub use console::ConsoleStop;
