//! Mapping an inbound request onto its upstream endpoint.
//!
//! # Responsibilities
//! - Strip the mount prefix from the inbound path
//! - Re-attach the raw query string exactly as received
//! - Describe the single outbound call as a [`ProxiedRequest`]

use axum::http::{Method, Uri};
use serde_json::Value;

/// One inbound call mapped onto one upstream call.
///
/// Built at the start of handling and consumed by the forwarding call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxiedRequest {
    pub method: Method,
    /// Path with the mount prefix removed, plus `?query` when one was sent.
    pub endpoint: String,
    pub body: Option<Value>,
}

impl ProxiedRequest {
    /// Full upstream URL: base URL followed by the endpoint.
    ///
    /// A trailing `/` on the base is dropped so the join never doubles it.
    pub fn target_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint)
    }
}

/// Compute the upstream endpoint for `uri` under `mount_prefix`.
///
/// Returns `None` when the path is not below the prefix or nothing remains
/// after stripping it. The query string is appended without re-encoding.
pub fn endpoint_from_uri(uri: &Uri, mount_prefix: &str) -> Option<String> {
    let rest = uri.path().strip_prefix(mount_prefix)?;
    if rest.is_empty() || !rest.starts_with('/') {
        return None;
    }

    match uri.query() {
        Some(query) if !query.is_empty() => Some(format!("{}?{}", rest, query)),
        _ => Some(rest.to_string()),
    }
}

/// GET and HEAD never carry a forwarded body.
pub fn carries_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}
