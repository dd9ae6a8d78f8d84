//! Node installation over SSH.
//!
//! # Responsibilities
//! - Stage a node release archive locally (download + safe extraction)
//! - Push the binary and config to a provisioned host and start it
//! - Wait for the node to bootstrap before declaring success

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde_json::json;
use uuid::Uuid;

use crate::cloud::ssh::SshSession;
use crate::cloud::{CloudError, CloudResult, NodeHost};
use crate::config::CloudConfig;
use crate::network::Network;
use crate::resilience::Backoff;
use crate::rpc::RpcClient;

/// Remote directory the node lives in, relative to the login user's home.
const REMOTE_DIR: &str = "subnetkit-node";

/// Installs and starts a node on a provisioned host.
pub struct NodeInstaller {
    config: CloudConfig,
    network: Network,
    http: reqwest::Client,
}

impl NodeInstaller {
    pub fn new(config: CloudConfig, network: Network) -> Self {
        Self {
            config,
            network,
            http: reqwest::Client::new(),
        }
    }

    /// Download a release archive and extract it into a staging directory.
    ///
    /// Returns the staging directory; the caller picks files out of it.
    /// Extraction goes through the sanitizing archive module, so a
    /// malicious release cannot write outside the staging directory.
    pub async fn stage_release(&self, url: &str) -> CloudResult<PathBuf> {
        tracing::info!(url, "Downloading node release");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CloudError::Download(e.to_string()))?;
        if !response.status().is_success() {
            return Err(CloudError::Download(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CloudError::Download(e.to_string()))?;

        let staging = std::env::temp_dir().join(format!("subnetkit-release-{}", Uuid::new_v4()));
        fs::create_dir_all(&staging)?;

        if url.ends_with(".zip") {
            let archive_path = staging.join("release.zip");
            fs::write(&archive_path, &bytes)?;
            crate::archive::extract_zip(&archive_path, &staging)?;
            fs::remove_file(&archive_path)?;
        } else {
            crate::archive::extract_tar_gz(bytes.as_ref(), &staging)?;
        }

        tracing::info!(staging = %staging.display(), "Release staged");
        Ok(staging)
    }

    /// Render the node's config file for the target network.
    fn render_node_config(&self) -> String {
        json!({
            "network-id": self.network.network_id(),
            "http-port": self.config.api_port,
            "staking-port": self.config.staking_port,
            "http-host": "0.0.0.0",
        })
        .to_string()
    }

    /// Install the node binary on a host and start it.
    ///
    /// `binary` is a path inside the staged release directory.
    pub async fn install(&self, host: &NodeHost, binary: &Path) -> CloudResult<()> {
        let ssh = SshSession::new(
            host.public_ip.clone(),
            self.config.ssh_user.clone(),
            self.config.ssh_key_path.clone(),
        );
        ssh.wait_for_ready(Duration::from_secs(180)).await?;

        ssh.run(&format!("mkdir -p {dir}/bin {dir}/config", dir = REMOTE_DIR))
            .await?;
        ssh.upload(binary, &format!("{}/bin/node", REMOTE_DIR)).await?;
        ssh.run(&format!("chmod +x {}/bin/node", REMOTE_DIR)).await?;

        let node_config = self.render_node_config();
        ssh.run(&format!(
            "cat > {}/config/node.json <<'EOF'\n{}\nEOF",
            REMOTE_DIR, node_config
        ))
        .await?;

        ssh.run(&format!(
            "nohup {dir}/bin/node --config-file {dir}/config/node.json > {dir}/node.log 2>&1 &",
            dir = REMOTE_DIR
        ))
        .await?;

        tracing::info!(host = %host.public_ip, "Node started");
        Ok(())
    }

    /// Wait for the node's chain to finish bootstrapping.
    pub async fn wait_bootstrapped(
        &self,
        client: &RpcClient,
        chain: &str,
        timeout: Duration,
    ) -> CloudResult<()> {
        let deadline = Instant::now() + timeout;
        let mut backoff = Backoff::new(2_000, 30_000);

        loop {
            match client.is_bootstrapped(chain).await {
                Ok(true) => {
                    tracing::info!(chain, "Node bootstrapped");
                    return Ok(());
                }
                Ok(false) => tracing::debug!(chain, "Still bootstrapping"),
                // The API may not be listening yet right after start
                Err(e) => tracing::debug!(chain, error = %e, "Node API not answering yet"),
            }

            if Instant::now() >= deadline {
                return Err(CloudError::Timeout(format!("bootstrap of chain {}", chain)));
            }
            tokio::time::sleep(backoff.next_delay()).await;
        }
    }
}
