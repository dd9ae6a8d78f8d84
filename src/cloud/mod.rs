//! Cloud node provisioning subsystem.
//!
//! # Data Flow
//! ```text
//! CloudConfig (region, instance type, key pair, ports)
//!     → aws.rs (security group, launch, wait running, public IPs, terminate)
//!     → ssh.rs (remote commands and uploads over the system ssh/scp)
//!     → install.rs (stage release archive, push to host, start, wait bootstrapped)
//! ```
//!
//! # Design Decisions
//! - SSH goes through the system client via tokio::process, so host key
//!   and agent handling match what the operator already uses
//! - Provisioning is idempotent where AWS allows it (security group is
//!   looked up before being created)

pub mod aws;
pub mod install;
pub mod ssh;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::rpc::types::RpcError;

pub use aws::Ec2Provisioner;
pub use install::NodeInstaller;
pub use ssh::SshSession;

/// Errors from provisioning and node installation.
#[derive(Debug, Error)]
pub enum CloudError {
    /// AWS API failure.
    #[error("AWS error: {0}")]
    Aws(String),

    /// A remote command exited nonzero.
    #[error("ssh command '{cmd}' failed with code {code}: {stderr}")]
    Ssh {
        cmd: String,
        code: i32,
        stderr: String,
    },

    /// An AWS response was missing an expected field.
    #[error("AWS response missing {0}")]
    MissingField(&'static str),

    /// A provisioning step did not finish in time.
    #[error("timed out waiting for {0}")]
    Timeout(String),

    /// Instances were launched but a later provisioning step failed.
    ///
    /// The ids are carried so the caller can terminate what is still
    /// running instead of leaking it.
    #[error("launch incomplete ({reason}), instances still running: {ids:?}")]
    LaunchIncomplete { ids: Vec<String>, reason: String },

    /// Release download failed.
    #[error("download error: {0}")]
    Download(String),

    /// Local filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Release archive extraction failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Node API failure while waiting for bootstrap.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Result type for cloud operations.
pub type CloudResult<T> = Result<T, CloudError>;

/// A provisioned node host.
#[derive(Debug, Clone)]
pub struct NodeHost {
    /// EC2 instance id.
    pub instance_id: String,

    /// Public IP address.
    pub public_ip: String,

    /// Node API port.
    pub api_port: u16,
}

impl NodeHost {
    /// Base URL of the node's API.
    pub fn api_url(&self) -> String {
        format!("http://{}:{}", self.public_ip, self.api_port)
    }
}
