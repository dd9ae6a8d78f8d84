//! Platform chain API wrappers.
//!
//! # Responsibilities
//! - Issue signed transactions and poll their acceptance
//! - Query balances, subnets, validator sets, and staking limits
//!
//! All methods go through [`RpcClient::call`] and inherit its failover
//! and timeout behavior.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::{interval, timeout};

use crate::rpc::client::RpcClient;
use crate::rpc::types::{
    ChainTxStatus, RpcError, RpcResult, StakeLimits, SubnetInfo, ValidatorInfo,
};
use crate::tx::TxId;

const PLATFORM_PATH: &str = "ext/platform";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueTxParams<'a> {
    tx: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueTxResult {
    tx_id: TxId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxStatusResult {
    status: String,
    reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResult {
    balance: u64,
}

#[derive(Deserialize)]
struct SubnetsResult {
    subnets: Vec<SubnetInfo>,
}

#[derive(Deserialize)]
struct ValidatorsResult {
    validators: Vec<ValidatorInfo>,
}

impl RpcClient {
    /// Issue a signed transaction (hex-encoded) to the platform chain.
    pub async fn issue_tx(&self, signed_tx_hex: &str) -> RpcResult<TxId> {
        let result: IssueTxResult = self
            .call(
                PLATFORM_PATH,
                "platform.issueTx",
                serde_json::to_value(IssueTxParams { tx: signed_tx_hex })
                    .map_err(|e| RpcError::InvalidResponse(e.to_string()))?,
            )
            .await?;

        tracing::info!(tx_id = %result.tx_id, "Transaction issued");
        Ok(result.tx_id)
    }

    /// Query the on-chain status of a transaction.
    pub async fn get_tx_status(&self, tx_id: &TxId) -> RpcResult<ChainTxStatus> {
        let result: TxStatusResult = self
            .call(
                PLATFORM_PATH,
                "platform.getTxStatus",
                json!({ "txID": tx_id }),
            )
            .await?;

        Ok(match result.status.as_str() {
            "Accepted" => ChainTxStatus::Accepted,
            "Processing" => ChainTxStatus::Processing,
            "Dropped" => ChainTxStatus::Dropped(result.reason.unwrap_or_default()),
            _ => ChainTxStatus::Unknown,
        })
    }

    /// Get the balance of an address on the platform chain.
    pub async fn get_balance(&self, address: &str) -> RpcResult<u64> {
        let result: BalanceResult = self
            .call(
                PLATFORM_PATH,
                "platform.getBalance",
                json!({ "address": address }),
            )
            .await?;
        Ok(result.balance)
    }

    /// List all subnets the node knows about.
    pub async fn get_subnets(&self) -> RpcResult<Vec<SubnetInfo>> {
        let result: SubnetsResult = self
            .call(PLATFORM_PATH, "platform.getSubnets", json!({}))
            .await?;
        Ok(result.subnets)
    }

    /// List the current validator set.
    ///
    /// With `subnet_id` set, lists that subnet's validators; otherwise the
    /// primary network's.
    pub async fn get_current_validators(
        &self,
        subnet_id: Option<&TxId>,
    ) -> RpcResult<Vec<ValidatorInfo>> {
        let params = match subnet_id {
            Some(id) => json!({ "subnetID": id }),
            None => json!({}),
        };
        let result: ValidatorsResult = self
            .call(PLATFORM_PATH, "platform.getCurrentValidators", params)
            .await?;
        Ok(result.validators)
    }

    /// Minimum staking amounts enforced by the network.
    pub async fn get_min_stake(&self) -> RpcResult<StakeLimits> {
        self.call(PLATFORM_PATH, "platform.getMinStake", json!({}))
            .await
    }

    /// Wait for a transaction to be accepted.
    ///
    /// Polls `platform.getTxStatus` until the transaction is accepted,
    /// dropped, or the configured acceptance window elapses.
    pub async fn wait_for_acceptance(&self, tx_id: &TxId) -> RpcResult<()> {
        let window_secs = self.config().acceptance_timeout_secs;
        let window = Duration::from_secs(window_secs);

        let result = timeout(window, async {
            let mut ticker = interval(self.poll_interval());

            loop {
                ticker.tick().await;

                match self.get_tx_status(tx_id).await? {
                    ChainTxStatus::Accepted => return Ok(()),
                    ChainTxStatus::Dropped(reason) => {
                        return Err(RpcError::TxDropped(reason));
                    }
                    status => {
                        tracing::debug!(tx_id = %tx_id, ?status, "Waiting for acceptance");
                    }
                }
            }
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => Err(RpcError::AcceptanceTimeout(window_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_status_mapping() {
        let parse = |status: &str, reason: Option<&str>| -> ChainTxStatus {
            let result = TxStatusResult {
                status: status.to_string(),
                reason: reason.map(String::from),
            };
            match result.status.as_str() {
                "Accepted" => ChainTxStatus::Accepted,
                "Processing" => ChainTxStatus::Processing,
                "Dropped" => ChainTxStatus::Dropped(result.reason.unwrap_or_default()),
                _ => ChainTxStatus::Unknown,
            }
        };

        assert_eq!(parse("Accepted", None), ChainTxStatus::Accepted);
        assert_eq!(parse("Processing", None), ChainTxStatus::Processing);
        assert_eq!(
            parse("Dropped", Some("insufficient funds")),
            ChainTxStatus::Dropped("insufficient funds".to_string())
        );
        assert_eq!(parse("Committed?", None), ChainTxStatus::Unknown);
    }
}
