//! Locally produced proxy failures.
//!
//! Upstream responses with a non-2xx status are not errors here; they are
//! relayed like any other response. Everything in [`ProxyError`] renders as
//! `{"error": ...}` with the most specific status known.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Fallback text when a transport failure carries no message.
pub const GENERIC_ERROR: &str = "Internal Server Error";

/// Body text for requests with no upstream endpoint.
pub const NOT_FOUND: &str = "Api Not Found";

#[derive(Debug, Error)]
pub enum ProxyError {
    /// No upstream base URL was configured.
    #[error("upstream base URL is not configured (set API_URL or upstream.base_url)")]
    MissingUpstream,

    /// Nothing remained after stripping the mount prefix.
    #[error("Api Not Found")]
    NotFound,

    /// The upstream could not be reached or its response could not be read.
    #[error("upstream transport error: {message}")]
    Transport {
        status: Option<StatusCode>,
        message: String,
    },
}

impl ProxyError {
    /// Describe a failed upstream exchange. `status` is set once response
    /// headers have arrived and only the body failed.
    pub fn transport(status: Option<StatusCode>, err: &(dyn std::error::Error + 'static)) -> Self {
        ProxyError::Transport {
            status,
            message: error_chain(err),
        }
    }

    /// The outbound call did not finish within `timeout`.
    pub fn timeout(timeout: Duration) -> Self {
        ProxyError::Transport {
            status: None,
            message: format!("upstream request timed out after {:?}", timeout),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingUpstream => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Transport { status, .. } => {
                status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// The value placed under the `error` key.
    pub fn detail(&self) -> Value {
        match self {
            ProxyError::MissingUpstream => Value::String(self.to_string()),
            ProxyError::NotFound => Value::String(NOT_FOUND.to_string()),
            ProxyError::Transport { message, .. } if !message.is_empty() => {
                Value::String(message.clone())
            }
            ProxyError::Transport { .. } => Value::String(GENERIC_ERROR.to_string()),
        }
    }
}

/// `outer: inner: root` so connection errors keep their OS-level cause.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.detail() }))).into_response()
    }
}
