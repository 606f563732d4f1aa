//! Start command: run a manual timer and submit it.
//!
//! The workflow moves through resolving the project, waiting on the user,
//! and submitting the entry. The project is resolved before the clock
//! starts so a typo in the project file does not cost a timed session.

use std::io::{self, Write};

use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Args;
use thiserror::Error;

use tgl_api::{ApiError, Client, Resource, Transport, resolve_project};
use tgl_core::{NewTimeEntry, Project, ProjectSettings};

const TASK_LABEL: &str = "Task: ";

#[derive(Debug, Args)]
pub struct StartArgs {
    /// What you are working on.
    #[arg(required = true, num_args = 1..)]
    pub description: Vec<String>,
}

impl StartArgs {
    /// The description words joined with single spaces.
    pub fn description(&self) -> String {
        self.description.join(" ")
    }
}

/// Errors that end a timer run.
#[derive(Debug, Error)]
pub enum StartError {
    /// No project matched the project file.
    #[error("The {0} was not found.")]
    ProjectNotFound(ProjectSettings),
    /// The user interrupted the timer instead of stopping it.
    #[error("task cancelled")]
    Cancelled,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// How the user ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enter was pressed: submit the entry.
    Confirmed,
    /// Interrupted or input closed: discard the entry.
    Cancelled,
}

/// Blocks until the user stops the timer.
pub trait StopSignal {
    fn wait(&mut self) -> io::Result<StopReason>;
}

/// Resolves the configured project or fails with [`StartError::ProjectNotFound`].
pub fn require_project<T: Transport>(
    client: &Client<T>,
    settings: &ProjectSettings,
) -> Result<Project, StartError> {
    resolve_project(client, settings)?.ok_or_else(|| StartError::ProjectNotFound(settings.clone()))
}

/// Runs the timer and submits the resulting entry.
///
/// Returns the submitted entry. Nothing is posted unless the user confirms.
pub fn run<W, T, S, C>(
    writer: &mut W,
    client: &Client<T>,
    settings: &ProjectSettings,
    description: &str,
    stop: &mut S,
    clock: &C,
) -> Result<NewTimeEntry, StartError>
where
    W: Write,
    T: Transport,
    S: StopSignal,
    C: Clock,
{
    let project = require_project(client, settings)?;

    let started = clock.now();
    tracing::info!(project = project.id, %started, "timer started");
    writeln!(writer)?;
    write_banner(
        writer,
        description,
        &project.name,
        settings.client.as_deref(),
        &started.with_timezone(&Local),
    )?;
    writer.flush()?;

    if stop.wait()? == StopReason::Cancelled {
        tracing::info!("timer cancelled, nothing submitted");
        return Err(StartError::Cancelled);
    }

    let stopped = clock.now();
    writeln!(writer, "Sending data...")?;

    let entry = NewTimeEntry::from_timer(project.id, description, started, stopped);
    tracing::info!(duration = entry.duration, "submitting time entry");
    client.post(Resource::TimeEntries, &entry.clone().into_request())?;

    writeln!(writer, "Success.")?;
    Ok(entry)
}

/// Prints what is being timed and how to stop it.
fn write_banner<W, Tz>(
    writer: &mut W,
    description: &str,
    project: &str,
    client: Option<&str>,
    started: &DateTime<Tz>,
) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    writeln!(writer, "{TASK_LABEL}{description}")?;
    writeln!(writer, "Project: {project}")?;
    if let Some(client) = client {
        writeln!(writer, "Client: {client}")?;
    }
    writeln!(writer, "{}", started.format("Started at: %I:%M%p"))?;
    let width = TASK_LABEL.len() + description.chars().count();
    writeln!(writer, "{}", "-".repeat(width))?;
    writeln!(writer, "Press Enter to stop timer... (CTRL-C to cancel)")
}
