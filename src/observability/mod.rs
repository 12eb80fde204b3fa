//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route table operations produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (registration/resolution counters, route gauge)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr so CLI output on stdout stays machine-readable
//! - `RUST_LOG` overrides the configured level
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
