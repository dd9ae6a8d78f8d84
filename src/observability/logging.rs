//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, for binaries and tests
//! - Respect RUST_LOG, falling back to the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_level`. Calling this twice is an error
/// from the subscriber; use it once at process start.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("subnetkit={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
