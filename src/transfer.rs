// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-chain AVAX transfers between the C-Chain and the P-Chain.
//!
//! A transfer is an atomic export on the source chain followed by an import
//! on the destination chain. The two halves run strictly in sequence: the
//! import is only prepared once the export is accepted. There is no rollback.
//! If the import fails, the exported funds wait in atomic memory until a
//! later import picks them up.

use std::fmt;
use std::io::Write;

use crate::balance::{check_balance, ensure_sufficient, BalanceSource, InsufficientBalance};
use crate::blockchain::{AvalancheAccount, Chain};
use crate::config::TransferConfig;
use crate::report::Reporter;
use crate::wallet::{
    CChainExportRequest, CChainImportRequest, ExportedOutput, ImportedOutput,
    PChainExportRequest, PChainImportRequest, PreparedTxn, SentTxn, WalletClient, WalletError,
};

/// Direction of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    CToP,
    PToC,
}

impl Direction {
    pub fn source(self) -> Chain {
        match self {
            Direction::CToP => Chain::C,
            Direction::PToC => Chain::P,
        }
    }

    pub fn destination(self) -> Chain {
        match self {
            Direction::CToP => Chain::P,
            Direction::PToC => Chain::C,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.source(), self.destination())
    }
}

/// Stage of a transaction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStage {
    Prepare,
    Send,
    Confirm,
}

impl fmt::Display for TxStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TxStage::Prepare => "preparing",
            TxStage::Send => "sending",
            TxStage::Confirm => "confirming",
        })
    }
}

/// Both accepted halves of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub export: SentTxn,
    pub import: SentTxn,
}

/// Runs one transfer for one account.
pub struct TransferRunner<'a, W: ?Sized, B: ?Sized> {
    config: &'a TransferConfig,
    account: &'a AvalancheAccount,
    wallet: &'a W,
    balances: &'a B,
}

impl<'a, W, B> TransferRunner<'a, W, B>
where
    W: WalletClient + ?Sized,
    B: BalanceSource + ?Sized,
{
    pub fn new(
        config: &'a TransferConfig,
        account: &'a AvalancheAccount,
        wallet: &'a W,
        balances: &'a B,
    ) -> Self {
        Self {
            config,
            account,
            wallet,
            balances,
        }
    }

    /// Gate on the source balance, then export and import.
    ///
    /// No wallet call is made unless the source chain holds the amount plus
    /// the fee buffer.
    pub async fn run<O: Write>(
        &self,
        direction: Direction,
        reporter: &mut Reporter<O>,
    ) -> Result<TransferReceipt, TransferError> {
        let network = &self.config.account.endpoints.network;
        let amount = self.config.amount;
        let evm_address = self.account.evm_address();
        let p_address = self.account.p_chain_address();
        let source = direction.source();
        let destination = direction.destination();

        reporter.line("Addresses:");
        reporter.address(Chain::C, &evm_address);
        reporter.address(Chain::P, &p_address);
        reporter.line(format!("Transfer amount: {amount} AVAX ({direction}, {})", network.name));
        reporter.blank();

        let source_address = match source {
            Chain::C => &evm_address,
            Chain::P => &p_address,
        };
        let balance = check_balance(self.balances, source, source_address).await;
        reporter.balance(source, &balance);
        ensure_sufficient(source, balance.effective(), amount)?;

        tracing::info!(%direction, %amount, network = network.key, "Starting transfer");

        reporter.step(1, 2, &format!("Exporting from {source}-Chain"));
        let prepared = match direction {
            Direction::CToP => {
                self.wallet
                    .prepare_c_export(&CChainExportRequest {
                        destination_chain: destination,
                        from_address: evm_address.clone(),
                        exported_output: ExportedOutput {
                            addresses: vec![p_address.clone()],
                            amount,
                        },
                    })
                    .await
            }
            Direction::PToC => {
                self.wallet
                    .prepare_p_export(&PChainExportRequest {
                        destination_chain: destination,
                        exported_outputs: vec![ExportedOutput {
                            addresses: vec![p_address.clone()],
                            amount,
                        }],
                    })
                    .await
            }
        }
        .map_err(|source| TransferError::Export {
            stage: TxStage::Prepare,
            source,
        })?;

        let export = self
            .submit(&prepared, reporter)
            .await
            .map_err(|(stage, source)| TransferError::Export { stage, source })?;
        reporter.line("   Exported to atomic memory");
        reporter.blank();

        reporter.step(2, 2, &format!("Importing to {destination}-Chain"));
        let prepared = match direction {
            Direction::CToP => {
                self.wallet
                    .prepare_p_import(&PChainImportRequest {
                        source_chain: source,
                        imported_output: ImportedOutput {
                            addresses: vec![p_address.clone()],
                        },
                    })
                    .await
            }
            Direction::PToC => {
                self.wallet
                    .prepare_c_import(&CChainImportRequest {
                        source_chain: source,
                        to_address: evm_address.clone(),
                    })
                    .await
            }
        }
        .map_err(|e| TransferError::import(&export, TxStage::Prepare, e))?;

        let import = self
            .submit(&prepared, reporter)
            .await
            .map_err(|(stage, e)| TransferError::import(&export, stage, e))?;
        reporter.line(format!("   Imported to {destination}-Chain"));

        tracing::info!(
            export_tx = %export.tx_hash,
            import_tx = %import.tx_hash,
            "Transfer complete"
        );
        Ok(TransferReceipt { export, import })
    }

    /// Send, report the explorer link, then wait for acceptance.
    ///
    /// The link is printed before waiting so the hash is on screen even if
    /// confirmation fails.
    async fn submit<O: Write>(
        &self,
        prepared: &PreparedTxn,
        reporter: &mut Reporter<O>,
    ) -> Result<SentTxn, (TxStage, WalletError)> {
        reporter.line("   Signing and sending...");
        let sent = self
            .wallet
            .send_xp_transaction(prepared)
            .await
            .map_err(|e| (TxStage::Send, e))?;
        tracing::debug!(tx_id = %sent.tx_hash, chain = %sent.chain, "Transaction issued");
        reporter.tx_link(&self.config.account.endpoints.network, sent.chain, &sent.tx_hash);

        reporter.line("   Waiting for confirmation...");
        self.wallet
            .wait_for_txn(&sent)
            .await
            .map_err(|e| (TxStage::Confirm, e))?;
        Ok(sent)
    }
}

/// Errors raised by a transfer.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    InsufficientBalance(#[from] InsufficientBalance),

    #[error("Export failed while {stage}: {source}")]
    Export {
        stage: TxStage,
        #[source]
        source: WalletError,
    },

    /// The export is accepted; its funds sit in atomic memory.
    #[error(
        "Import failed while {stage}: {source} (export {} is accepted, funds remain in atomic memory)",
        .export.tx_hash
    )]
    Import {
        export: SentTxn,
        stage: TxStage,
        #[source]
        source: WalletError,
    },
}

impl TransferError {
    fn import(export: &SentTxn, stage: TxStage, source: WalletError) -> Self {
        TransferError::Import {
            export: export.clone(),
            stage,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_pair_source_and_destination() {
        assert_eq!(Direction::CToP.source(), Chain::C);
        assert_eq!(Direction::CToP.destination(), Chain::P);
        assert_eq!(Direction::PToC.source(), Chain::P);
        assert_eq!(Direction::PToC.destination(), Chain::C);
        assert_eq!(Direction::PToC.to_string(), "P→C");
    }

    #[test]
    fn import_error_names_the_accepted_export() {
        let err = TransferError::import(
            &SentTxn {
                tx_hash: "2exportHash".to_string(),
                chain: Chain::C,
            },
            TxStage::Send,
            WalletError::Signing("boom".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Import failed while sending: Signing failed: boom (export 2exportHash is accepted, funds remain in atomic memory)"
        );
    }
}
