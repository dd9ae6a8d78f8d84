//! Resilience primitives shared by RPC polling and provisioning.

pub mod backoff;

pub use backoff::Backoff;
