//! Toggl REST API client.
//!
//! A single fixed integration: build `<resource>.json` URLs, authenticate
//! with the user's API token, GET and POST JSON, and look projects up by
//! name.

mod client;
pub mod resolve;
pub mod resource;
pub mod transport;

use tgl_core::ShapeError;
use thiserror::Error;

pub use client::{Client, DEFAULT_API_URL, TOKEN_PASSWORD};
pub use resolve::{find_record_by_field, resolve_project};
pub use resource::{Resource, UnknownResource, build_url};
#[cfg(any(test, feature = "test-util"))]
pub use transport::MockTransport;
pub use transport::{HttpTransport, Method, Response, Transport};

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The provided API token was invalid.
    #[error("invalid API token: {reason}")]
    InvalidApiToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed before a response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The API rejected a GET.
    #[error("API returned status {status}; please verify your login credentials")]
    Authentication { status: u16 },
    /// The response body was not JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The JSON did not have the expected structure.
    #[error("unexpected response shape: {0}")]
    Shape(#[from] ShapeError),
    /// A request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),
}
