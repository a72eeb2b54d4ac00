// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Production [`WalletClient`]: builder service + local signing + node RPC.

use async_trait::async_trait;

use super::builder::TxBuilderClient;
use super::jsonrpc::{JsonRpcClient, DEFAULT_REQUEST_TIMEOUT};
use super::node::NodeRpc;
use super::signing::sign_prepared;
use super::{
    CChainExportRequest, CChainImportRequest, ConvertSubnetToL1Request, PChainExportRequest,
    PChainImportRequest, PreparedTxn, SentTxn, WalletClient, WalletError,
};
use crate::blockchain::AvalancheAccount;
use crate::config::EndpointConfig;

/// Wallet client for one account on one network.
pub struct AvalancheWalletClient {
    account: AvalancheAccount,
    builder: TxBuilderClient,
    node: NodeRpc,
}

impl AvalancheWalletClient {
    pub fn new(account: AvalancheAccount, builder: TxBuilderClient, node: NodeRpc) -> Self {
        Self {
            account,
            builder,
            node,
        }
    }

    /// Build a client from the configured endpoints.
    pub fn from_endpoints(
        account: AvalancheAccount,
        endpoints: &EndpointConfig,
    ) -> Result<Self, WalletError> {
        let builder = TxBuilderClient::new(
            endpoints.builder_url.clone(),
            JsonRpcClient::new(DEFAULT_REQUEST_TIMEOUT)?,
        );
        let node = node_rpc(endpoints)?;
        Ok(Self::new(account, builder, node))
    }
}

/// Node client honoring the configured confirmation timeout.
pub fn node_rpc(endpoints: &EndpointConfig) -> Result<NodeRpc, WalletError> {
    Ok(NodeRpc::new(
        endpoints.api_url.clone(),
        JsonRpcClient::new(DEFAULT_REQUEST_TIMEOUT)?,
        endpoints.confirm_timeout,
    ))
}

#[async_trait]
impl WalletClient for AvalancheWalletClient {
    async fn prepare_c_export(
        &self,
        request: &CChainExportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.builder.prepare_c_export(request).await
    }

    async fn prepare_p_import(
        &self,
        request: &PChainImportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.builder.prepare_p_import(request).await
    }

    async fn prepare_p_export(
        &self,
        request: &PChainExportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.builder.prepare_p_export(request).await
    }

    async fn prepare_c_import(
        &self,
        request: &CChainImportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.builder.prepare_c_import(request).await
    }

    async fn prepare_convert_subnet_to_l1(
        &self,
        request: &ConvertSubnetToL1Request,
    ) -> Result<PreparedTxn, WalletError> {
        self.builder.prepare_convert_subnet_to_l1(request).await
    }

    async fn send_xp_transaction(&self, prepared: &PreparedTxn) -> Result<SentTxn, WalletError> {
        let signed = sign_prepared(&self.account, prepared)?;
        self.node.issue_tx(prepared.chain, &signed).await
    }

    async fn wait_for_txn(&self, sent: &SentTxn) -> Result<(), WalletError> {
        self.node.wait_for_acceptance(sent).await
    }
}
