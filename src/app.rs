// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Entry points shared by the binaries.
//!
//! Each `run_*` function loads its configuration, wires the production
//! clients and drives one flow. The binaries only call [`bootstrap`], one
//! `run_*` function and [`exit_code`].

use std::io::Write;
use std::process::ExitCode;

use crate::balance::{check_balance, AvalancheBalances, BalanceCheck, GlacierClient};
use crate::blockchain::{AvalancheAccount, Chain};
use crate::config::{AccountConfig, ConversionConfig, TransferConfig};
use crate::conversion::convert_subnet_to_l1;
use crate::error::XchainError;
use crate::logging;
use crate::report::Reporter;
use crate::transfer::{Direction, TransferReceipt, TransferRunner};
use crate::wallet::client::node_rpc;
use crate::wallet::{AvalancheWalletClient, SentTxn};

/// Load `.env` (if present) and install logging.
pub fn bootstrap() {
    let dotenv = dotenvy::dotenv();
    logging::init();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env"),
    }
}

/// Map a run result to the process exit status.
///
/// Failures print `Error: <message>` to stderr and exit with 1.
pub fn exit_code<T>(result: Result<T, XchainError>) -> ExitCode {
    exit_code_to(result, &mut std::io::stderr())
}

/// [`exit_code`] with the error line written to `stderr`.
pub fn exit_code_to<T, E: Write>(result: Result<T, XchainError>, stderr: &mut E) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Run failed");
            let _ = writeln!(stderr, "Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn derive_account(config: &AccountConfig) -> Result<AvalancheAccount, XchainError> {
    Ok(AvalancheAccount::from_private_key_hex(
        config.private_key.expose(),
        &config.endpoints.network,
    )?)
}

fn production_balances(config: &AccountConfig) -> Result<AvalancheBalances, XchainError> {
    let endpoints = &config.endpoints;
    let glacier = GlacierClient::new(endpoints.glacier_url.clone(), endpoints.network.chain_id)?;
    Ok(AvalancheBalances::new(glacier, node_rpc(endpoints)?))
}

/// Move `TRANSFER_AMOUNT` AVAX in `direction`.
pub async fn run_transfer<O: Write>(
    direction: Direction,
    reporter: &mut Reporter<O>,
) -> Result<TransferReceipt, XchainError> {
    let config = TransferConfig::from_env()?;
    let account = derive_account(&config.account)?;
    let balances = production_balances(&config.account)?;
    let wallet = AvalancheWalletClient::from_endpoints(account.clone(), &config.account.endpoints)?;

    let runner = TransferRunner::new(&config, &account, &wallet, &balances);
    Ok(runner.run(direction, reporter).await?)
}

/// Convert the configured subnet into an L1.
pub async fn run_conversion<O: Write>(reporter: &mut Reporter<O>) -> Result<SentTxn, XchainError> {
    let config = ConversionConfig::from_env()?;
    let account = derive_account(&config.account)?;
    let wallet = AvalancheWalletClient::from_endpoints(account.clone(), &config.account.endpoints)?;

    Ok(convert_subnet_to_l1(&config, &account, &wallet, reporter).await?)
}

/// Print the account's addresses and balances on both chains.
pub async fn run_balances<O: Write>(
    reporter: &mut Reporter<O>,
) -> Result<(BalanceCheck, BalanceCheck), XchainError> {
    let config = AccountConfig::from_env()?;
    let account = derive_account(&config)?;
    let balances = production_balances(&config)?;

    reporter.line(format!("Network: {}", config.endpoints.network.name));
    reporter.address(Chain::C, &account.evm_address());
    reporter.address(Chain::P, &account.p_chain_address());

    let c_balance = check_balance(&balances, Chain::C, &account.evm_address()).await;
    reporter.balance(Chain::C, &c_balance);
    let p_balance = check_balance(&balances, Chain::P, &account.p_chain_address()).await;
    reporter.balance(Chain::P, &p_balance);

    Ok((c_balance, p_balance))
}
