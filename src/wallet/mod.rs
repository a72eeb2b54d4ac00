// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet client boundary for atomic and P-Chain transactions.
//!
//! [`WalletClient`] is the seam between the transfer/conversion flows and the
//! machinery that turns a request into an accepted transaction. The flows only
//! ever see request value objects, [`PreparedTxn`] and [`SentTxn`].
//!
//! [`AvalancheWalletClient`] is the production implementation:
//! - `builder` assembles unsigned transactions (UTXO selection, codec, fees)
//! - `signing` signs them with the local account key
//! - `node` issues them and polls for acceptance

pub mod builder;
pub mod client;
pub mod jsonrpc;
pub mod node;
pub mod signing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::blockchain::{Amount, Chain};

pub use client::AvalancheWalletClient;
pub use jsonrpc::RpcError;
pub use node::NodeRpc;

// =============================================================================
// Requests
// =============================================================================

/// Output owned by a set of X/P addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedOutput {
    pub addresses: Vec<String>,
    #[serde(rename = "amountNanoAvax")]
    pub amount: Amount,
}

/// Recipient set for imported funds on the P-Chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedOutput {
    pub addresses: Vec<String>,
}

/// Export AVAX from the C-Chain into atomic memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CChainExportRequest {
    pub destination_chain: Chain,
    pub from_address: String,
    pub exported_output: ExportedOutput,
}

/// Import AVAX from atomic memory into the P-Chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PChainImportRequest {
    pub source_chain: Chain,
    pub imported_output: ImportedOutput,
}

/// Export AVAX from the P-Chain into atomic memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PChainExportRequest {
    pub destination_chain: Chain,
    pub exported_outputs: Vec<ExportedOutput>,
}

/// Import AVAX from atomic memory into a C-Chain account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CChainImportRequest {
    pub source_chain: Chain,
    pub to_address: String,
}

/// Proof that a validator holds the BLS key it registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofOfPossession {
    /// Compressed BLS public key (48 bytes, hex)
    pub public_key: String,
    /// BLS signature over the public key (96 bytes, hex)
    pub proof_of_possession: String,
}

/// P-Chain owner: `threshold` of `addresses` must sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PChainOwner {
    pub addresses: Vec<String>,
    pub threshold: u32,
}

/// Initial L1 validator registered by a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1Validator {
    pub node_id: String,
    #[serde(rename = "nodePoP")]
    pub node_pop: ProofOfPossession,
    pub weight: u64,
    #[serde(rename = "initialBalanceNanoAvax")]
    pub initial_balance: Amount,
    pub remaining_balance_owner: PChainOwner,
    pub deactivation_owner: PChainOwner,
}

/// Convert a permissioned subnet into an L1 managed by a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertSubnetToL1Request {
    pub subnet_id: String,
    pub blockchain_id: String,
    pub manager_contract_address: String,
    pub validators: Vec<L1Validator>,
    /// Indices into the subnet owner's addresses that sign the conversion
    pub subnet_auth: Vec<u32>,
}

// =============================================================================
// Transactions
// =============================================================================

/// An unsigned transaction ready to be signed and issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTxn {
    /// Chain the transaction is issued on
    pub chain: Chain,
    /// Codec-serialized unsigned transaction
    pub unsigned_tx: Vec<u8>,
    /// Signer addresses for each credential, in input order
    pub credentials: Vec<Vec<String>>,
}

/// Handle of an issued transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentTxn {
    pub tx_hash: String,
    pub chain: Chain,
}

/// Status reported by the node for an issued transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// Accepted (C-Chain atomic) or committed (P-Chain)
    Accepted,
    Processing,
    Dropped,
    Unknown,
}

impl TxStatus {
    /// Map the status strings of `avax.getAtomicTxStatus` and `platform.getTxStatus`.
    pub fn from_node(raw: &str) -> Self {
        match raw {
            "Accepted" | "Committed" => TxStatus::Accepted,
            "Processing" => TxStatus::Processing,
            "Dropped" | "Rejected" | "Aborted" => TxStatus::Dropped,
            _ => TxStatus::Unknown,
        }
    }
}

// =============================================================================
// Client trait
// =============================================================================

/// Builds, signs, issues and confirms atomic and P-Chain transactions.
#[async_trait]
pub trait WalletClient: Send + Sync {
    async fn prepare_c_export(&self, request: &CChainExportRequest)
        -> Result<PreparedTxn, WalletError>;

    async fn prepare_p_import(&self, request: &PChainImportRequest)
        -> Result<PreparedTxn, WalletError>;

    async fn prepare_p_export(&self, request: &PChainExportRequest)
        -> Result<PreparedTxn, WalletError>;

    async fn prepare_c_import(&self, request: &CChainImportRequest)
        -> Result<PreparedTxn, WalletError>;

    async fn prepare_convert_subnet_to_l1(
        &self,
        request: &ConvertSubnetToL1Request,
    ) -> Result<PreparedTxn, WalletError>;

    /// Sign and issue a prepared transaction.
    async fn send_xp_transaction(&self, prepared: &PreparedTxn) -> Result<SentTxn, WalletError>;

    /// Block until the transaction is accepted, or fail if it is dropped or
    /// the confirmation timeout elapses.
    async fn wait_for_txn(&self, sent: &SentTxn) -> Result<(), WalletError>;
}

/// Errors raised by wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("Invalid prepared transaction: {0}")]
    InvalidPreparedTx(String),

    #[error("Cannot sign for address {0}: not controlled by this account")]
    UnknownSigner(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Transaction {tx_hash} was dropped: {reason}")]
    Dropped { tx_hash: String, reason: String },

    #[error("Transaction {tx_hash} not accepted after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: String, waited_secs: u64 },
}
