//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::api::ApiArgs;
use crate::commands::start::StartArgs;

/// Command line Toggl timer.
///
/// Starts a timer against the project named in `.toggl_project`, waits for
/// Enter, and submits the time entry.
#[derive(Debug, Parser)]
#[command(name = "tgl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the project file (defaults to `.toggl_project`).
    #[arg(short, long, global = true)]
    pub project_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a timer and submit it when Enter is pressed.
    Start(StartArgs),

    /// Show the project the project file resolves to.
    Project,

    /// List projects.
    Projects,

    /// List clients.
    Clients,

    /// List tasks.
    Tasks,

    /// Show the latest time entries as JSON.
    Entries,

    /// Fetch any API resource and print the raw JSON.
    Api(ApiArgs),
}
