//! The proxy handler: one inbound request, one upstream call.
//!
//! # Flow
//! ```text
//! inbound request
//!     → base URL configured?          no  → 500 {"error": ...}
//!     → endpoint after prefix strip?  no  → 404 {"error": "Api Not Found"}
//!     → JSON body (non-GET/HEAD only, unparsable = none)
//!     → one upstream call, any status accepted
//!     → upstream status + upstream bytes, unmodified
//! ```
//!
//! The handler holds only immutable values; concurrent requests share nothing
//! mutable. No retries are attempted.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, Uri},
    response::{IntoResponse, Response},
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde_json::Value;
use tokio::time;

use crate::config::{RouteConfig, UpstreamConfig};
use crate::proxy::endpoint::{carries_body, endpoint_from_uri, ProxiedRequest};
use crate::proxy::error::ProxyError;

const APPLICATION_JSON: &str = "application/json";

type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Forwards requests below the mount prefix to the upstream API.
#[derive(Debug, Clone)]
pub struct ProxyHandler {
    upstream_base_url: Option<String>,
    mount_prefix: String,
    max_body_size: usize,
    timeout: Duration,
    client: UpstreamClient,
}

impl ProxyHandler {
    pub fn new(upstream: &UpstreamConfig, route: &RouteConfig) -> Self {
        // Errors only if a provider is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        // Plain http and https upstreams share one pooled client.
        let connector = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            upstream_base_url: upstream.base_url.clone(),
            mount_prefix: route.mount_prefix.clone(),
            max_body_size: route.max_body_size,
            timeout: Duration::from_secs(upstream.timeout_secs),
            client,
        }
    }

    /// Override the outbound timeout taken from `upstream.timeout_secs`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mount_prefix(&self) -> &str {
        &self.mount_prefix
    }

    pub fn upstream_base_url(&self) -> Option<&str> {
        self.upstream_base_url.as_deref()
    }

    /// Handle one inbound request. Local failures are rendered as JSON errors.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        match self.proxy(request).await {
            Ok(response) => response,
            Err(err) => err.into_response(),
        }
    }

    async fn proxy(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let base_url = self
            .upstream_base_url
            .as_deref()
            .ok_or(ProxyError::MissingUpstream)?;

        let (parts, body) = request.into_parts();
        let endpoint =
            endpoint_from_uri(&parts.uri, &self.mount_prefix).ok_or(ProxyError::NotFound)?;

        let body = if carries_body(&parts.method) {
            self.read_json_body(body).await
        } else {
            None
        };

        self.forward(
            base_url,
            ProxiedRequest {
                method: parts.method,
                endpoint,
                body,
            },
        )
        .await
    }

    /// Read the inbound body as JSON.
    ///
    /// A missing, oversized, or unparsable body is treated as no body at all;
    /// the request is still forwarded and the caller never sees a 400.
    async fn read_json_body(&self, body: Body) -> Option<Value> {
        let bytes = match axum::body::to_bytes(body, self.max_body_size).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Inbound body unreadable, forwarding without body");
                return None;
            }
        };

        if bytes.is_empty() {
            return None;
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Inbound body is not JSON, forwarding without body");
                None
            }
        }
    }

    async fn forward(
        &self,
        base_url: &str,
        request: ProxiedRequest,
    ) -> Result<Response, ProxyError> {
        let url = request.target_url(base_url);

        tracing::debug!(
            method = %request.method,
            url = %url,
            has_body = request.body.is_some(),
            "Forwarding to upstream"
        );

        // `Uri` keeps the query exactly as received; nothing is re-encoded.
        let uri = url
            .parse::<Uri>()
            .map_err(|e| ProxyError::transport(None, &e))?;

        let body = match &request.body {
            Some(value) => Body::from(
                serde_json::to_vec(value).map_err(|e| ProxyError::transport(None, &e))?,
            ),
            None => Body::empty(),
        };

        let outbound = Request::builder()
            .method(request.method)
            .uri(uri)
            .header(header::CONTENT_TYPE, APPLICATION_JSON)
            .body(body)
            .map_err(|e| ProxyError::transport(None, &e))?;

        let exchange = async {
            let upstream = self.client.request(outbound).await.map_err(|e| {
                tracing::warn!(url = %url, error = %e, "Upstream request failed");
                ProxyError::transport(None, &e)
            })?;

            let (parts, body) = upstream.into_parts();
            let bytes = axum::body::to_bytes(Body::new(body), usize::MAX)
                .await
                .map_err(|e| {
                    tracing::warn!(
                        url = %url,
                        status = %parts.status,
                        error = %e,
                        "Upstream body unreadable"
                    );
                    ProxyError::transport(Some(parts.status), &e)
                })?;

            Ok::<_, ProxyError>((parts.status, bytes))
        };

        let (status, bytes) = time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                tracing::warn!(url = %url, timeout = ?self.timeout, "Upstream request timed out");
                ProxyError::timeout(self.timeout)
            })??;

        Ok((status, [(header::CONTENT_TYPE, APPLICATION_JSON)], bytes).into_response())
    }
}
