//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing, level from config or RUST_LOG
//! - Metrics go through the `metrics` facade; consumers pick the recorder

pub mod logging;
pub mod metrics;
