use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tgl_api::Resource;
use tgl_cli::commands::start::{StartError, SystemClock};
use tgl_cli::commands::{api, list, project, start};
use tgl_cli::{Cli, Commands, Config, ConsoleStop, load_project_settings};
use tgl_core::ProjectSettings;

/// Exit status after the user cancels a running timer.
const EXIT_CANCELLED: u8 = 130;

/// Reads the project file named on the command line or in the config.
fn project_settings(cli: &Cli, config: &Config) -> Result<ProjectSettings> {
    let path = cli.project_file.as_ref().unwrap_or(&config.project_file);
    let settings = load_project_settings(path)?;
    tracing::debug!(?settings, path = %path.display(), "loaded project settings");
    Ok(settings)
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Start(args)) => {
            // Settings first: a broken project file should not need a token.
            let settings = project_settings(cli, &config)?;
            let client = config.client()?;
            let mut stop = ConsoleStop::new();
            start::run(
                &mut stdout,
                &client,
                &settings,
                &args.description(),
                &mut stop,
                &SystemClock,
            )?;
        }
        Some(Commands::Project) => {
            let settings = project_settings(cli, &config)?;
            project::run(&mut stdout, &config.client()?, &settings)?;
        }
        Some(Commands::Projects) => {
            list::run(&mut stdout, &config.client()?, Resource::Projects)?;
        }
        Some(Commands::Clients) => {
            list::run(&mut stdout, &config.client()?, Resource::Clients)?;
        }
        Some(Commands::Tasks) => {
            list::run(&mut stdout, &config.client()?, Resource::Tasks)?;
        }
        Some(Commands::Entries) => {
            api::entries(&mut stdout, &config.client()?)?;
        }
        Some(Commands::Api(args)) => {
            api::run(&mut stdout, &config.client()?, args)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if matches!(err.downcast_ref::<StartError>(), Some(StartError::Cancelled)) => {
            eprintln!("Task cancelled. Exiting");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
