//! Backend-for-Frontend proxy subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/server/posts?limit=5
//!     → endpoint.rs (strip mount prefix, keep raw query) → "/posts?limit=5"
//!     → handler.rs (config check, JSON body, forward through the pooled upstream client)
//!     → error.rs (local failures as {"error": ...})
//!     → upstream status + body relayed verbatim
//! ```

pub mod endpoint;
pub mod error;
pub mod handler;

pub use endpoint::{endpoint_from_uri, ProxiedRequest};
pub use error::ProxyError;
pub use handler::ProxyHandler;
