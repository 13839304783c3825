//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::server
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters and latency histograms)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
pub use metrics::init_metrics;
