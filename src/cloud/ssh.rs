//! SSH sessions over the system ssh/scp clients.
//!
//! # Responsibilities
//! - Run remote commands, surfacing exit code and stderr on failure
//! - Upload files with scp
//! - Wait for a freshly launched host to accept connections

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::cloud::{CloudError, CloudResult};
use crate::resilience::Backoff;

const SSH_OPTS: [&str; 6] = [
    "-o",
    "StrictHostKeyChecking=accept-new",
    "-o",
    "BatchMode=yes",
    "-o",
    "ConnectTimeout=10",
];

/// An SSH target: host, user, and identity file.
#[derive(Debug, Clone)]
pub struct SshSession {
    host: String,
    user: String,
    key_path: PathBuf,
}

impl SshSession {
    pub fn new(host: impl Into<String>, user: impl Into<String>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            key_path: key_path.into(),
        }
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Run a command on the remote host, returning its stdout.
    pub async fn run(&self, cmd: &str) -> CloudResult<String> {
        tracing::debug!(host = %self.host, cmd, "Running remote command");

        let output = Command::new("ssh")
            .args(SSH_OPTS)
            .arg("-i")
            .arg(&self.key_path)
            .arg(self.destination())
            .arg(cmd)
            .output()
            .await?;

        if !output.status.success() {
            return Err(CloudError::Ssh {
                cmd: cmd.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Upload a local file to the remote path with scp.
    pub async fn upload(&self, local: &Path, remote: &str) -> CloudResult<()> {
        tracing::debug!(host = %self.host, local = %local.display(), remote, "Uploading file");

        let output = Command::new("scp")
            .args(SSH_OPTS)
            .arg("-i")
            .arg(&self.key_path)
            .arg(local)
            .arg(format!("{}:{}", self.destination(), remote))
            .output()
            .await?;

        if !output.status.success() {
            return Err(CloudError::Ssh {
                cmd: format!("scp {}", local.display()),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    /// Wait until the host accepts SSH connections.
    ///
    /// Freshly launched instances take a while before sshd answers; retry
    /// a no-op command with backoff until `timeout` elapses.
    pub async fn wait_for_ready(&self, timeout: Duration) -> CloudResult<()> {
        let deadline = Instant::now() + timeout;
        let mut backoff = Backoff::new(1_000, 15_000);

        loop {
            match self.run("true").await {
                Ok(_) => {
                    tracing::info!(host = %self.host, attempts = backoff.attempts(), "SSH ready");
                    return Ok(());
                }
                Err(e) if Instant::now() >= deadline => {
                    tracing::warn!(host = %self.host, error = %e, "SSH never became ready");
                    return Err(CloudError::Timeout(format!("ssh to {}", self.host)));
                }
                Err(e) => {
                    tracing::debug!(host = %self.host, error = %e, "SSH not ready yet");
                }
            }
            tokio::time::sleep(backoff.next_delay()).await;
        }
    }

    /// The remote host.
    pub fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_format() {
        let session = SshSession::new("203.0.113.7", "ubuntu", "/tmp/key.pem");
        assert_eq!(session.destination(), "ubuntu@203.0.113.7");
    }

    #[tokio::test]
    async fn test_run_failure_carries_stderr() {
        // `ssh` to an unresolvable host fails fast with BatchMode
        let session = SshSession::new("invalid.host.localdomain", "nobody", "/tmp/nokey");
        let result = session.run("true").await;
        match result {
            Err(CloudError::Ssh { cmd, .. }) => assert_eq!(cmd, "true"),
            // No ssh binary on the test host
            Err(CloudError::Io(_)) => {}
            other => panic!("expected ssh failure, got {:?}", other),
        }
    }
}
