//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fetch client, aggregator:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters via the metrics facade)
//!
//! Consumers:
//!     → stderr log output
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so stdout stays clean JSON for the CLI
//! - Metrics are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
