//! Authenticated access to the time tracking API.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tgl_core::{Record, records_from_envelope};

use crate::ApiError;
use crate::resource::build_url;
use crate::transport::{BasicAuth, HttpTransport, Method, Request, Transport};

/// Base URL of the v6 API.
pub const DEFAULT_API_URL: &str = "https://www.toggl.com/api/v6/";

/// Basic auth password that accompanies an API token.
pub const TOKEN_PASSWORD: &str = "api_token";

/// API client.
///
/// Every request authenticates with the API token as the basic auth
/// username and [`TOKEN_PASSWORD`] as the password.
pub struct Client<T = HttpTransport> {
    transport: T,
    base_url: String,
    auth: BasicAuth,
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client<HttpTransport> {
    /// Creates a client that talks HTTP to `api_url`.
    pub fn new(api_url: &str, api_token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_transport(HttpTransport::new()?, api_url, api_token)
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over an arbitrary transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only.
    pub fn with_transport(
        transport: T,
        api_url: &str,
        api_token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(ApiError::InvalidApiToken {
                reason: "API token cannot be empty",
            });
        }
        if api_token.trim().is_empty() {
            return Err(ApiError::InvalidApiToken {
                reason: "API token cannot be whitespace-only",
            });
        }

        let mut base_url = api_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            transport,
            base_url,
            auth: BasicAuth {
                username: api_token,
                password: TOKEN_PASSWORD.to_string(),
            },
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for `resource` with optional query parameters.
    pub fn url(&self, resource: impl AsRef<str>, params: &[(&str, &str)]) -> String {
        build_url(&self.base_url, resource.as_ref(), params)
    }

    /// Fetches `resource` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Any non-2xx status is reported as [`ApiError::Authentication`]; no
    /// value is returned in that case.
    pub fn get(&self, resource: impl AsRef<str>, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self.url(resource, params);
        tracing::debug!(%url, "GET");

        let response = self.transport.send(&Request {
            method: Method::Get,
            url,
            auth: &self.auth,
            json_body: None,
        })?;
        if !response.is_success() {
            return Err(ApiError::Authentication {
                status: response.status,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    /// Fetches a list resource and unpacks its `data` envelope.
    pub fn get_list(&self, resource: impl AsRef<str>) -> Result<Vec<Record>, ApiError> {
        let response = self.get(resource, &[])?;
        Ok(records_from_envelope(response)?)
    }

    /// Sends `body` as JSON to `resource`.
    ///
    /// The response is not inspected beyond logging a non-2xx status.
    pub fn post<B: Serialize>(&self, resource: impl AsRef<str>, body: &B) -> Result<(), ApiError> {
        let url = self.url(resource, &[]);
        let json_body = serde_json::to_string(body).map_err(ApiError::Serialize)?;
        tracing::debug!(%url, "POST");

        let response = self.transport.send(&Request {
            method: Method::Post,
            url,
            auth: &self.auth,
            json_body: Some(json_body),
        })?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "POST returned a non-success status");
        }
        Ok(())
    }
}
