//! Info API wrappers: node identity, version, bootstrap state.

use serde::Deserialize;
use serde_json::json;

use crate::rpc::client::RpcClient;
use crate::rpc::types::{NodeId, RpcResult};

const INFO_PATH: &str = "ext/info";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeIdResult {
    node_id: NodeId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkIdResult {
    network_id: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BootstrappedResult {
    is_bootstrapped: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionResult {
    version: String,
}

impl RpcClient {
    /// The node's own identifier.
    pub async fn node_id(&self) -> RpcResult<NodeId> {
        let result: NodeIdResult = self
            .call(INFO_PATH, "info.getNodeID", json!({}))
            .await?;
        Ok(result.node_id)
    }

    /// The numeric id of the network the node serves.
    pub async fn network_id(&self) -> RpcResult<u32> {
        let result: NetworkIdResult = self
            .call(INFO_PATH, "info.getNetworkID", json!({}))
            .await?;
        Ok(result.network_id)
    }

    /// Whether the given chain has finished bootstrapping on this node.
    pub async fn is_bootstrapped(&self, chain: &str) -> RpcResult<bool> {
        let result: BootstrappedResult = self
            .call(INFO_PATH, "info.isBootstrapped", json!({ "chain": chain }))
            .await?;
        Ok(result.is_bootstrapped)
    }

    /// The node's software version string.
    pub async fn node_version(&self) -> RpcResult<String> {
        let result: VersionResult = self
            .call(INFO_PATH, "info.getNodeVersion", json!({}))
            .await?;
        Ok(result.version)
    }
}
