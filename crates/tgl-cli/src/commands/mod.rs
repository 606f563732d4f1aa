//! CLI subcommand implementations.

pub mod api;
pub mod list;
pub mod project;
pub mod start;
