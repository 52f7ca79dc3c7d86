//! Blocking transport for executing [`HttpRequest`] values.
//!
//! # Design
//! [`Transport`] is the seam between the client's pure request/response
//! handling and real network I/O, so tests can substitute a recording or
//! failing implementation. [`UreqTransport`] is the production one: a
//! blocking `ureq::Agent` with automatic status-code-as-error behavior
//! disabled, so 4xx/5xx responses come back as data and the client stays
//! the single owner of status interpretation. The agent's connection pool
//! is reused across sequential calls.

use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a single HTTP round-trip, blocking until response or failure.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Production transport backed by a blocking [`ureq::Agent`].
pub struct UreqTransport {
    agent: ureq::Agent,
}

/// Applied when the caller does not choose a timeout; covers the full
/// round-trip of one request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl UreqTransport {
    /// Build a transport with the given global per-request timeout.
    /// `None` disables the timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = ureq::http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // PATCH has no sugar method on `Agent`, so every request goes
        // through the generic `http::Request` path.
        let result = match &request.body {
            Some(body) => {
                let req = builder
                    .body(body.as_str())
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
                self.agent.run(req)
            }
            None => {
                let req = builder
                    .body(())
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
                self.agent.run(req)
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
