// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Avalanche node JSON-RPC: issuing transactions, polling their status and
//! reading P-Chain balances.
//!
//! | Chain | Endpoint | Issue | Status |
//! |-------|----------|-------|--------|
//! | C (atomic) | `/ext/bc/C/avax` | `avax.issueTx` | `avax.getAtomicTxStatus` |
//! | P | `/ext/bc/P` | `platform.issueTx` | `platform.getTxStatus` |

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::jsonrpc::{JsonRpcClient, RpcError};
use super::{SentTxn, TxStatus, WalletError};
use crate::blockchain::{encoding::encode_checked_hex, Amount, Chain};

/// Default interval between status polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct IssueTxResult {
    #[serde(rename = "txID")]
    tx_id: String,
}

#[derive(Debug, Deserialize)]
struct TxStatusResult {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlatformBalanceResult {
    /// Spendable nAVAX; `balance` also counts locked stake
    unlocked: String,
}

/// JSON-RPC client for an Avalanche API node.
#[derive(Debug)]
pub struct NodeRpc {
    api_url: Url,
    rpc: JsonRpcClient,
    poll_interval: Duration,
    confirm_timeout: Duration,
}

impl NodeRpc {
    pub fn new(api_url: Url, rpc: JsonRpcClient, confirm_timeout: Duration) -> Self {
        Self {
            api_url,
            rpc,
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirm_timeout,
        }
    }

    /// Override the status poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Endpoint serving atomic or platform calls for `chain`.
    pub fn endpoint(&self, chain: Chain) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        match chain {
            Chain::C => format!("{base}/ext/bc/C/avax"),
            Chain::P => format!("{base}/ext/bc/P"),
        }
    }

    /// Issue a signed transaction, returning its id.
    pub async fn issue_tx(&self, chain: Chain, signed_tx: &[u8]) -> Result<SentTxn, WalletError> {
        let method = match chain {
            Chain::C => "avax.issueTx",
            Chain::P => "platform.issueTx",
        };
        let params = json!({
            "tx": encode_checked_hex(signed_tx),
            "encoding": "hex",
        });

        let result: IssueTxResult = self
            .rpc
            .call(&self.endpoint(chain), method, &params)
            .await?;

        tracing::info!(tx_id = %result.tx_id, %chain, "Issued transaction");

        Ok(SentTxn {
            tx_hash: result.tx_id,
            chain,
        })
    }

    /// Fetch the current status of an issued transaction.
    pub async fn tx_status(&self, sent: &SentTxn) -> Result<(TxStatus, Option<String>), WalletError> {
        let method = match sent.chain {
            Chain::C => "avax.getAtomicTxStatus",
            Chain::P => "platform.getTxStatus",
        };
        let params = json!({ "txID": sent.tx_hash });

        let result: TxStatusResult = self
            .rpc
            .call(&self.endpoint(sent.chain), method, &params)
            .await?;

        Ok((TxStatus::from_node(&result.status), result.reason))
    }

    /// Poll until the transaction is accepted.
    ///
    /// `Processing` and `Unknown` keep polling: a freshly issued transaction
    /// can be `Unknown` until the node has gossiped it.
    pub async fn wait_for_acceptance(&self, sent: &SentTxn) -> Result<(), WalletError> {
        let started = Instant::now();

        loop {
            let (status, reason) = self.tx_status(sent).await?;
            tracing::debug!(tx_id = %sent.tx_hash, chain = %sent.chain, ?status, "Polled transaction status");

            match status {
                TxStatus::Accepted => {
                    tracing::info!(tx_id = %sent.tx_hash, chain = %sent.chain, "Transaction accepted");
                    return Ok(());
                }
                TxStatus::Dropped => {
                    return Err(WalletError::Dropped {
                        tx_hash: sent.tx_hash.clone(),
                        reason: reason.unwrap_or_else(|| "no reason given".to_string()),
                    });
                }
                TxStatus::Processing | TxStatus::Unknown => {}
            }

            if started.elapsed() >= self.confirm_timeout {
                return Err(WalletError::ConfirmationTimeout {
                    tx_hash: sent.tx_hash.clone(),
                    waited_secs: self.confirm_timeout.as_secs(),
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Unlocked P-Chain balance of `address` via `platform.getBalance`.
    ///
    /// Staked and time-locked outputs cannot fund an export, so only the
    /// `unlocked` field counts.
    pub async fn platform_balance(&self, address: &str) -> Result<Amount, RpcError> {
        let params = json!({ "addresses": [address] });
        let result: PlatformBalanceResult = self
            .rpc
            .call(&self.endpoint(Chain::P), "platform.getBalance", &params)
            .await?;

        Amount::from_nano_avax_str(&result.unlocked).map_err(|e| {
            RpcError::InvalidResponse(format!("platform.getBalance unlocked: {e}"))
        })
    }
}
