//! Backend-for-Frontend proxy.
//!
//! Requests under `/api/server/*` are forwarded to a configured upstream REST
//! API and the upstream's status and body are relayed unchanged.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use client::BffClient;
pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{ProxyError, ProxyHandler};
