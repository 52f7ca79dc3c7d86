//! HTTP requests and responses as plain data.
//!
//! # Design
//! The client describes every outbound call as an [`HttpRequest`] value and
//! interprets the resulting [`HttpResponse`] without touching the network;
//! executing the round-trip is the job of a [`crate::Transport`]. Building a
//! request is a pure construction step with no I/O side effects, so the
//! method/body rules are enforced here, before anything reaches the wire.
//!
//! Every request carries `content-type: application/json`, bodyless methods
//! included; the service tolerates the header on GET and DELETE.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// HTTP method for a request. The service is driven with exactly these four
/// verbs; anything else is rejected at token-parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether this method may carry a request body.
    pub fn allows_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Patch)
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(token: &str) -> Result<Self, ApiError> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ApiError::UnsupportedMethod(token.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Build a request for `url`. A body supplied with a method that does
    /// not allow one is rejected before any network activity.
    pub fn new(
        url: impl Into<String>,
        method: HttpMethod,
        body: Option<String>,
    ) -> Result<Self, ApiError> {
        if body.is_some() && !method.allows_body() {
            return Err(ApiError::InvalidArgument(format!(
                "{method} request must not carry a body"
            )));
        }
        Ok(Self {
            method,
            url: url.into(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }
}

/// An HTTP response described as plain data, produced by a
/// [`crate::Transport`] after executing an [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The single success predicate for HTTP outcomes: true iff
/// `200 <= status < 300`. All outcome branching in the client goes
/// through this.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
