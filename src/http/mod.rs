//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign x-request-id)
//!     → proxy::ProxyHandler (strip prefix, forward, relay)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
