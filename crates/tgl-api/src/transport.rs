//! The wire underneath [`Client`](crate::Client).
//!
//! [`HttpTransport`] talks to the real service with a blocking reqwest
//! client. `MockTransport`, behind the `test-util` feature, answers from
//! canned responses and keeps every request it saw, so commands can be
//! exercised without a network.

#[cfg(any(test, feature = "test-util"))]
use std::cell::RefCell;
#[cfg(any(test, feature = "test-util"))]
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::ApiError;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// HTTP basic auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &"[REDACTED]")
            .field("password", &self.password)
            .finish()
    }
}

/// A fully built request.
#[derive(Debug)]
pub struct Request<'a> {
    pub method: Method,
    pub url: String,
    pub auth: &'a BasicAuth,
    /// JSON body; sent with `Content-Type: application/json`.
    pub json_body: Option<String>,
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
///
/// Implementations make a single attempt; retries are not part of the
/// contract.
pub trait Transport {
    fn send(&self, request: &Request<'_>) -> Result<Response, ApiError>;
}

/// Transport backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request<'_>) -> Result<Response, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self
            .http
            .request(method, &request.url)
            .basic_auth(&request.auth.username, Some(&request.auth.password));
        if let Some(body) = &request.json_body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(Response { status, body })
    }
}

/// A request as seen by [`MockTransport`].
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub auth: BasicAuth,
    pub json_body: Option<String>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordedRequest {
    /// Parses the recorded body as JSON.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.json_body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }
}

/// In-memory transport for tests.
///
/// Unregistered routes answer `404` with an empty body.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: HashMap<(Method, String), Response>,
    requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(any(test, feature = "test-util"))]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the response for `method` on the exact `url`.
    #[must_use]
    pub fn route(mut self, method: Method, url: impl Into<String>, response: Response) -> Self {
        self.routes.insert((method, url.into()), response);
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Requests sent with `method`.
    pub fn requests_with(&self, method: Method) -> Vec<RecordedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method == method)
            .cloned()
            .collect()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Transport for MockTransport {
    fn send(&self, request: &Request<'_>) -> Result<Response, ApiError> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            auth: request.auth.clone(),
            json_body: request.json_body.clone(),
        });
        Ok(self
            .routes
            .get(&(request.method, request.url.clone()))
            .cloned()
            .unwrap_or_else(|| Response::status(404)))
    }
}
