// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for the transaction builder service.
//!
//! The builder owns everything about transaction construction: UTXO
//! selection, codec serialization and fee computation. It exposes one
//! JSON-RPC 2.0 method per prepare operation. `params` is a single object
//! (named parameters); amounts are integer nAVAX.
//!
//! | Method | `params` |
//! |--------|----------|
//! | `cChain.prepareExportTxn` | `{ "destinationChain": "P", "fromAddress": "0x…", "exportedOutput": { "addresses": ["P-fuji1…"], "amountNanoAvax": 1000000 } }` |
//! | `pChain.prepareImportTxn` | `{ "sourceChain": "C", "importedOutput": { "addresses": ["P-fuji1…"] } }` |
//! | `pChain.prepareExportTxn` | `{ "destinationChain": "C", "exportedOutputs": [{ "addresses": ["P-fuji1…"], "amountNanoAvax": 1000000 }] }` |
//! | `cChain.prepareImportTxn` | `{ "sourceChain": "P", "toAddress": "0x…" }` |
//! | `pChain.prepareConvertSubnetToL1Txn` | see below |
//!
//! Conversion params:
//!
//! ```json
//! {
//!   "subnetId": "2qYC…",
//!   "blockchainId": "2cgx…",
//!   "managerContractAddress": "0xfacade…",
//!   "validators": [{
//!     "nodeId": "NodeID-…",
//!     "nodePoP": { "publicKey": "0x<48 bytes>", "proofOfPossession": "0x<96 bytes>" },
//!     "weight": 100,
//!     "initialBalanceNanoAvax": 100000000,
//!     "remainingBalanceOwner": { "addresses": ["P-fuji1…"], "threshold": 1 },
//!     "deactivationOwner": { "addresses": ["P-fuji1…"], "threshold": 1 }
//!   }],
//!   "subnetAuth": [0]
//! }
//! ```
//!
//! Every method answers with the unsigned transaction in checksummed hex
//! (`0x` + bytes + last 4 bytes of their sha256) and, per credential in input
//! order, the addresses that must sign it. `chainAlias` must match the chain
//! the method builds for.
//!
//! ```json
//! {
//!   "chainAlias": "P",
//!   "unsignedTx": "0x0000...<4-byte checksum>",
//!   "credentials": [{ "signers": ["P-fuji1..."] }]
//! }
//! ```
//!
//! Failures are ordinary JSON-RPC `error` objects and surface as
//! [`RpcError::Remote`](super::jsonrpc::RpcError::Remote).

use serde::{Deserialize, Serialize};
use url::Url;

use super::jsonrpc::JsonRpcClient;
use super::{
    CChainExportRequest, CChainImportRequest, ConvertSubnetToL1Request, PChainExportRequest,
    PChainImportRequest, PreparedTxn, WalletError,
};
use crate::blockchain::{encoding::decode_checked_hex, Chain};

pub const METHOD_C_EXPORT: &str = "cChain.prepareExportTxn";
pub const METHOD_C_IMPORT: &str = "cChain.prepareImportTxn";
pub const METHOD_P_EXPORT: &str = "pChain.prepareExportTxn";
pub const METHOD_P_IMPORT: &str = "pChain.prepareImportTxn";
pub const METHOD_CONVERT_SUBNET_TO_L1: &str = "pChain.prepareConvertSubnetToL1Txn";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuilderResult {
    chain_alias: Chain,
    unsigned_tx: String,
    #[serde(default)]
    credentials: Vec<CredentialSigners>,
}

#[derive(Debug, Deserialize)]
struct CredentialSigners {
    signers: Vec<String>,
}

/// JSON-RPC client for the transaction builder.
#[derive(Debug)]
pub struct TxBuilderClient {
    url: Url,
    rpc: JsonRpcClient,
}

impl TxBuilderClient {
    pub fn new(url: Url, rpc: JsonRpcClient) -> Self {
        Self { url, rpc }
    }

    pub async fn prepare_c_export(
        &self,
        request: &CChainExportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepare(METHOD_C_EXPORT, request, Chain::C).await
    }

    pub async fn prepare_p_import(
        &self,
        request: &PChainImportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepare(METHOD_P_IMPORT, request, Chain::P).await
    }

    pub async fn prepare_p_export(
        &self,
        request: &PChainExportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepare(METHOD_P_EXPORT, request, Chain::P).await
    }

    pub async fn prepare_c_import(
        &self,
        request: &CChainImportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepare(METHOD_C_IMPORT, request, Chain::C).await
    }

    pub async fn prepare_convert_subnet_to_l1(
        &self,
        request: &ConvertSubnetToL1Request,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepare(METHOD_CONVERT_SUBNET_TO_L1, request, Chain::P)
            .await
    }

    async fn prepare<R: Serialize + ?Sized>(
        &self,
        method: &str,
        request: &R,
        expected_chain: Chain,
    ) -> Result<PreparedTxn, WalletError> {
        let result: BuilderResult = self.rpc.call(self.url.as_str(), method, request).await?;
        into_prepared(method, result, expected_chain)
    }
}

fn into_prepared(
    method: &str,
    result: BuilderResult,
    expected_chain: Chain,
) -> Result<PreparedTxn, WalletError> {
    if result.chain_alias != expected_chain {
        return Err(WalletError::InvalidPreparedTx(format!(
            "{method} built a {}-Chain transaction, expected {}-Chain",
            result.chain_alias, expected_chain
        )));
    }

    let unsigned_tx = decode_checked_hex(&result.unsigned_tx)
        .map_err(|e| WalletError::InvalidPreparedTx(format!("{method}: {e}")))?;

    if result.credentials.is_empty() {
        return Err(WalletError::InvalidPreparedTx(format!(
            "{method}: transaction has no credentials"
        )));
    }

    tracing::debug!(
        %method,
        chain = %expected_chain,
        bytes = unsigned_tx.len(),
        credentials = result.credentials.len(),
        "Prepared transaction"
    );

    Ok(PreparedTxn {
        chain: expected_chain,
        unsigned_tx,
        credentials: result
            .credentials
            .into_iter()
            .map(|c| c.signers)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::encoding::encode_checked_hex;
    use serde_json::json;

    fn result(chain: &str, tx: &str, signers: &[&str]) -> BuilderResult {
        serde_json::from_value(json!({
            "chainAlias": chain,
            "unsignedTx": tx,
            "credentials": [{ "signers": signers }],
        }))
        .unwrap()
    }

    #[test]
    fn test_into_prepared_decodes_transaction() {
        let encoded = encode_checked_hex(&[0x00, 0x00, 0x12]);
        let prepared = into_prepared(
            METHOD_P_EXPORT,
            result("P", &encoded, &["P-fuji1abc"]),
            Chain::P,
        )
        .unwrap();
        assert_eq!(prepared.chain, Chain::P);
        assert_eq!(prepared.unsigned_tx, vec![0x00, 0x00, 0x12]);
        assert_eq!(prepared.credentials, vec![vec!["P-fuji1abc".to_string()]]);
    }

    #[test]
    fn test_into_prepared_rejects_wrong_chain() {
        let encoded = encode_checked_hex(&[0x00, 0x00, 0x01]);
        let err = into_prepared(
            METHOD_C_EXPORT,
            result("P", &encoded, &["0xabc"]),
            Chain::C,
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected C-Chain"));
    }

    #[test]
    fn test_into_prepared_rejects_bad_checksum() {
        let err = into_prepared(
            METHOD_P_IMPORT,
            result("P", "0x0000000100000000", &["P-fuji1abc"]),
            Chain::P,
        )
        .unwrap_err();
        assert!(matches!(err, WalletError::InvalidPreparedTx(_)));
    }

    #[test]
    fn test_into_prepared_requires_credentials() {
        let encoded = encode_checked_hex(&[0x00, 0x00, 0x01]);
        let no_creds: BuilderResult = serde_json::from_value(json!({
            "chainAlias": "C",
            "unsignedTx": encoded,
        }))
        .unwrap();
        assert!(into_prepared(METHOD_C_IMPORT, no_creds, Chain::C).is_err());
    }
}
