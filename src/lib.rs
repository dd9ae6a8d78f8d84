//! Subnet operations SDK.
//!
//! Higher-level helpers over a platform node's JSON-RPC interfaces: key and
//! keychain management, the multi-signature transaction workflow that
//! controls subnets, validator management, and cloud-node provisioning
//! (AWS EC2 + SSH).
//!
//! # Architecture Overview
//!
//! ```text
//!   operator code
//!        │
//!        ▼
//!   ┌─────────┐   ┌──────────┐   ┌─────────┐
//!   │ subnet  │──▶│    tx    │──▶│   rpc   │──▶ node API (JSON-RPC)
//!   │ helpers │   │ multisig │   │ client  │
//!   └─────────┘   └────┬─────┘   └─────────┘
//!                      │
//!                 ┌────▼─────┐
//!                 │ keychain │
//!                 └──────────┘
//!
//!   ┌─────────┐   ┌─────────┐   ┌─────────┐
//!   │  cloud  │──▶│   ssh   │   │ archive │  (provisioning path)
//!   │  (EC2)  │   │ session │   │ extract │
//!   └─────────┘   └─────────┘   └─────────┘
//!
//!   Cross-cutting: config, observability, resilience
//! ```

pub mod archive;
pub mod cloud;
pub mod config;
pub mod keychain;
pub mod network;
pub mod observability;
pub mod resilience;
pub mod rpc;
pub mod subnet;
pub mod tx;

pub use config::schema::SdkConfig;
pub use keychain::{Keychain, SoftKey};
pub use network::Network;
pub use rpc::client::RpcClient;
pub use subnet::Subnet;
pub use tx::{MultisigTx, TxStatus, UnsignedTx};
