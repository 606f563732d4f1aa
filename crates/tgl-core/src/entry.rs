//! Outbound time entries.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Tag sent as `created_with` on every entry this client submits.
pub const CREATED_WITH: &str = "tgl command line client";

/// Whole seconds between `start` and `stop`.
///
/// Sub-second precision is dropped and a stop before the start (clock
/// adjustments) yields zero.
pub fn elapsed_seconds(start: DateTime<Utc>, stop: DateTime<Utc>) -> u64 {
    u64::try_from((stop - start).num_seconds()).unwrap_or(0)
}

/// Reference to the project an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectRef {
    pub id: u64,
}

/// A finished manual timer, ready to submit.
///
/// `stop` is always sent as `null`: the service derives the stop time from
/// `start` and `duration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTimeEntry {
    pub duration: u64,
    #[serde(serialize_with = "serialize_utc")]
    pub start: DateTime<Utc>,
    pub stop: Option<DateTime<Utc>>,
    pub created_with: &'static str,
    pub project: ProjectRef,
    pub description: String,
}

impl NewTimeEntry {
    /// Builds the entry for a timer that ran from `start` to `stop`.
    pub fn from_timer(
        project_id: u64,
        description: impl Into<String>,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    ) -> Self {
        Self {
            duration: elapsed_seconds(start, stop),
            start,
            stop: None,
            created_with: CREATED_WITH,
            project: ProjectRef { id: project_id },
            description: description.into(),
        }
    }

    /// Wraps the entry in the `{"time_entry": ...}` body the API expects.
    pub const fn into_request(self) -> TimeEntryRequest {
        TimeEntryRequest { time_entry: self }
    }
}

/// Body of a `POST time_entries` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntryRequest {
    pub time_entry: NewTimeEntry,
}

fn serialize_utc<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}
