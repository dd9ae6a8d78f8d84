//! Metrics collection.
//!
//! # Metrics
//! - `sdk_rpc_calls_total` (counter): RPC calls by method and outcome
//! - `sdk_endpoint_health` (gauge): 1=healthy, 0=unhealthy per endpoint
//! - `sdk_instances_launched_total` (counter): EC2 instances launched
//!
//! # Design Decisions
//! - The `metrics` facade only; the embedding application installs the
//!   recorder (Prometheus or otherwise)
//! - Low-overhead updates, safe to call on every request

use metrics::{counter, gauge};

/// Record one RPC call and whether it succeeded.
pub fn record_rpc_call(method: &str, ok: bool) {
    counter!(
        "sdk_rpc_calls_total",
        "method" => method.to_string(),
        "outcome" => if ok { "ok" } else { "error" },
    )
    .increment(1);
}

/// Record endpoint health as observed by the health check.
pub fn record_endpoint_health(endpoint: &str, healthy: bool) {
    gauge!("sdk_endpoint_health", "endpoint" => endpoint.to_string())
        .set(if healthy { 1.0 } else { 0.0 });
}

/// Record instances launched by the provisioner.
pub fn record_instances_launched(count: u64) {
    counter!("sdk_instances_launched_total").increment(count);
}
