//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the proxy routes under the mount prefix
//! - Wire up middleware (request ID, tracing)
//! - Record per-request metrics
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt};
use crate::lifecycle::shutdown::wait_for_shutdown;
use crate::observability::metrics;
use crate::proxy::{ProxyError, ProxyHandler};

/// Methods accepted on the proxy route. Anything else gets 405.
const PROXIED_METHODS: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyHandler>,
}

/// HTTP server hosting the BFF proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ProxyConfig) -> Self {
        Self::with_handler(ProxyHandler::new(&config.upstream, &config.proxy))
    }

    /// Create a server around an already built proxy handler.
    pub fn with_handler(handler: ProxyHandler) -> Self {
        if handler.upstream_base_url().is_none() {
            tracing::warn!("No upstream base URL configured; proxied requests will fail with 500");
        }

        Self {
            router: build_router(handler),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(handler: ProxyHandler) -> Router {
    let prefix = handler.mount_prefix().to_string();
    let state = AppState {
        proxy: Arc::new(handler),
    };

    Router::new()
        .route(&prefix, on(PROXIED_METHODS, proxy_handler))
        .route(&format!("{}/{{*endpoint}}", prefix), on(PROXIED_METHODS, proxy_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request.request_id(),
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
}

/// Proxy route entry point.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %request.uri().path(),
        "Proxying request"
    );

    let response = state.proxy.handle(request).await;
    let status = response.status();

    metrics::record_request(&method, status.as_u16(), start_time);
    tracing::info!(
        request_id = %request_id,
        method = %method,
        status = status.as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request proxied"
    );

    response
}

async fn not_found() -> Response {
    ProxyError::NotFound.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    #[tokio::test]
    async fn test_new_serves_configured_prefix() {
        let mut config = ProxyConfig::default();
        config.proxy.mount_prefix = "/bff".into();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let server = tokio::spawn(HttpServer::new(&config).run(listener, shutdown.subscribe()));

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        // No base URL is configured, so the mounted route answers 500.
        let res = client
            .get(format!("http://{}/bff/posts", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 500);

        let res = client
            .get(format!("http://{}/api/server/posts", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 404);
        drop(client);

        shutdown.trigger();
        server.await.unwrap().unwrap();
    }
}
