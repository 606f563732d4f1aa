//! Core domain logic for the tgl time tracking client.
//!
//! This crate contains the pieces that need no network access:
//! - Settings: the `KEY: value` project file naming project and client
//! - Records: checked access to the API's JSON list responses
//! - Entries: the outbound time entry and its duration arithmetic

pub mod entry;
pub mod record;
pub mod settings;

pub use entry::{CREATED_WITH, NewTimeEntry, ProjectRef, TimeEntryRequest, elapsed_seconds};
pub use record::{CLIENT_PROJECT_FIELD, Project, Record, ShapeError, records_from_envelope};
pub use settings::{ProjectSettings, SettingsError, parse_settings};
