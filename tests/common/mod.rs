// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relational_xchain::balance::{BalanceError, BalanceSource};
use relational_xchain::blockchain::{Amount, AvalancheAccount, Chain};
use relational_xchain::config::{ConversionConfig, TransferConfig};
use relational_xchain::wallet::{
    CChainExportRequest, CChainImportRequest, ConvertSubnetToL1Request, PChainExportRequest,
    PChainImportRequest, PreparedTxn, SentTxn, WalletClient, WalletError,
};

/// Well-known local test key.
pub const TEST_KEY: &str = "56289e99c94b6912bfc12adc093c9b51124f0dc54ac7a766b2bc5ccf558d8027";

pub fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

pub fn transfer_config(amount: &str) -> TransferConfig {
    TransferConfig::from_lookup(&lookup(&[
        ("PRIVATE_KEY", TEST_KEY),
        ("TRANSFER_AMOUNT", amount),
    ]))
    .unwrap()
}

pub fn conversion_config() -> ConversionConfig {
    let public_key = format!("0x{}", "94".repeat(48));
    let pop = format!("0x{}", "98".repeat(96));
    ConversionConfig::from_lookup(&lookup(&[
        ("PRIVATE_KEY", TEST_KEY),
        ("SUBNET_ID", "2qYCjAVYAtmmi2NnFSXmXHCzs99fWxAfxYQY2b6L9Agduf3Syd"),
        ("BLOCKCHAIN_ID", "2cgxZU4DpYPSim7R4hTUQ7LavoeVYWki4LYKhrCiN27DZzkmoa"),
        ("MANAGER_CONTRACT_ADDRESS", "0xfacade0000000000000000000000000000000000"),
        ("NODE_ID", "NodeID-CMpZrrUoevB2qPYD3w1TncAzdqQ8qdk4x"),
        ("NODE_PUBLIC_KEY", &public_key),
        ("NODE_PROOF_OF_POSSESSION", &pop),
    ]))
    .unwrap()
}

pub fn account(config: &TransferConfig) -> AvalancheAccount {
    AvalancheAccount::from_private_key_hex(
        config.account.private_key.expose(),
        &config.account.endpoints.network,
    )
    .unwrap()
}

/// Shared, ordered record of calls made on the fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Wallet that records every call.
///
/// Each prepared transaction carries a label (`c-export`, `p-import`, ...) as
/// its unsigned bytes, and sending it returns the hash `tx-<label>`. Setting
/// `fail_on` to a log entry makes that call fail.
pub struct FakeWallet {
    pub log: CallLog,
    pub fail_on: Option<String>,
    pub requests: Mutex<Vec<serde_json::Value>>,
}

impl FakeWallet {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_on: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(log: CallLog, entry: &str) -> Self {
        Self {
            fail_on: Some(entry.to_string()),
            ..Self::new(log)
        }
    }

    fn record(&self, entry: String) -> Result<(), WalletError> {
        self.log.push(entry.clone());
        if self.fail_on.as_deref() == Some(entry.as_str()) {
            return Err(WalletError::Signing(format!("injected failure at {entry}")));
        }
        Ok(())
    }

    fn prepared<R: serde::Serialize>(
        &self,
        label: &str,
        chain: Chain,
        request: &R,
    ) -> Result<PreparedTxn, WalletError> {
        self.record(format!("prepare:{label}"))?;
        self.requests
            .lock()
            .unwrap()
            .push(serde_json::to_value(request).unwrap());
        Ok(PreparedTxn {
            chain,
            unsigned_tx: label.as_bytes().to_vec(),
            credentials: vec![],
        })
    }
}

#[async_trait]
impl WalletClient for FakeWallet {
    async fn prepare_c_export(
        &self,
        request: &CChainExportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepared("c-export", Chain::C, request)
    }

    async fn prepare_p_import(
        &self,
        request: &PChainImportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepared("p-import", Chain::P, request)
    }

    async fn prepare_p_export(
        &self,
        request: &PChainExportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepared("p-export", Chain::P, request)
    }

    async fn prepare_c_import(
        &self,
        request: &CChainImportRequest,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepared("c-import", Chain::C, request)
    }

    async fn prepare_convert_subnet_to_l1(
        &self,
        request: &ConvertSubnetToL1Request,
    ) -> Result<PreparedTxn, WalletError> {
        self.prepared("convert", Chain::P, request)
    }

    async fn send_xp_transaction(&self, prepared: &PreparedTxn) -> Result<SentTxn, WalletError> {
        let label = String::from_utf8(prepared.unsigned_tx.clone()).unwrap();
        self.record(format!("send:{label}"))?;
        Ok(SentTxn {
            tx_hash: format!("tx-{label}"),
            chain: prepared.chain,
        })
    }

    async fn wait_for_txn(&self, sent: &SentTxn) -> Result<(), WalletError> {
        self.record(format!("wait:{}", sent.tx_hash))
    }
}

/// Balance source with fixed answers per chain.
pub struct FakeBalances {
    pub log: CallLog,
    pub c: Result<Amount, String>,
    pub p: Result<Amount, String>,
}

impl FakeBalances {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            c: Ok(Amount::ZERO),
            p: Ok(Amount::ZERO),
        }
    }

    /// C-Chain balance given as a wei string, as Glacier reports it.
    pub fn with_c_wei(mut self, wei: &str) -> Self {
        self.c = Ok(Amount::from_wei_str(wei).unwrap());
        self
    }

    pub fn with_p(mut self, avax: &str) -> Self {
        self.p = Ok(Amount::parse_avax(avax).unwrap());
        self
    }

    pub fn failing(mut self, chain: Chain, reason: &str) -> Self {
        match chain {
            Chain::C => self.c = Err(reason.to_string()),
            Chain::P => self.p = Err(reason.to_string()),
        }
        self
    }
}

#[async_trait]
impl BalanceSource for FakeBalances {
    async fn native_balance(&self, chain: Chain, address: &str) -> Result<Amount, BalanceError> {
        self.log.push(format!("balance:{chain}:{address}"));
        let answer = match chain {
            Chain::C => &self.c,
            Chain::P => &self.p,
        };
        answer.clone().map_err(BalanceError::Request)
    }
}
