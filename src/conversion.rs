// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subnet-to-L1 conversion.

use std::io::Write;

use crate::blockchain::{AvalancheAccount, Chain};
use crate::config::ConversionConfig;
use crate::report::Reporter;
use crate::transfer::TxStage;
use crate::wallet::{
    ConvertSubnetToL1Request, L1Validator, PChainOwner, ProofOfPossession, SentTxn, WalletClient,
    WalletError,
};

/// Build the conversion request for a single initial validator.
///
/// The account's P-Chain address owns both the remaining balance and the
/// deactivation rights, and the first subnet owner key signs.
pub fn build_request(
    config: &ConversionConfig,
    account: &AvalancheAccount,
) -> ConvertSubnetToL1Request {
    let owner = PChainOwner {
        addresses: vec![account.p_chain_address()],
        threshold: 1,
    };

    ConvertSubnetToL1Request {
        subnet_id: config.subnet_id.clone(),
        blockchain_id: config.blockchain_id.clone(),
        manager_contract_address: config.manager_contract_address.clone(),
        validators: vec![L1Validator {
            node_id: config.node_id.clone(),
            node_pop: ProofOfPossession {
                public_key: config.node_public_key.clone(),
                proof_of_possession: config.node_proof_of_possession.clone(),
            },
            weight: config.validator_weight,
            initial_balance: config.validator_balance,
            remaining_balance_owner: owner.clone(),
            deactivation_owner: owner,
        }],
        subnet_auth: vec![0],
    }
}

/// Prepare, send and confirm the conversion.
pub async fn convert_subnet_to_l1<W, O>(
    config: &ConversionConfig,
    account: &AvalancheAccount,
    wallet: &W,
    reporter: &mut Reporter<O>,
) -> Result<SentTxn, ConversionError>
where
    W: WalletClient + ?Sized,
    O: Write,
{
    let network = &config.account.endpoints.network;
    let request = build_request(config, account);

    reporter.line(format!("Converting subnet {} to an L1", request.subnet_id));
    reporter.line(format!("   Blockchain: {}", request.blockchain_id));
    reporter.line(format!("   Manager contract: {}", request.manager_contract_address));
    reporter.line(format!(
        "   Validator: {} (weight {}, balance {} AVAX)",
        config.node_id, config.validator_weight, config.validator_balance
    ));
    reporter.address(Chain::P, &account.p_chain_address());

    tracing::info!(
        subnet_id = %request.subnet_id,
        blockchain_id = %request.blockchain_id,
        network = network.key,
        "Submitting subnet-to-L1 conversion"
    );

    let prepared = wallet
        .prepare_convert_subnet_to_l1(&request)
        .await
        .map_err(|source| ConversionError::Wallet {
            stage: TxStage::Prepare,
            source,
        })?;

    let sent = wallet
        .send_xp_transaction(&prepared)
        .await
        .map_err(|source| ConversionError::Wallet {
            stage: TxStage::Send,
            source,
        })?;
    reporter.line("Convert subnet to L1 transaction sent");
    reporter.tx_link(network, sent.chain, &sent.tx_hash);

    wallet
        .wait_for_txn(&sent)
        .await
        .map_err(|source| ConversionError::Wallet {
            stage: TxStage::Confirm,
            source,
        })?;
    reporter.line("Subnet converted to L1");

    tracing::info!(tx_id = %sent.tx_hash, "Conversion accepted");
    Ok(sent)
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Subnet-to-L1 conversion failed while {stage}: {source}")]
    Wallet {
        stage: TxStage,
        #[source]
        source: WalletError,
    },
}
