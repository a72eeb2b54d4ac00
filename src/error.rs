// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::balance::BalanceError;
use crate::blockchain::AccountError;
use crate::config::ConfigError;
use crate::conversion::ConversionError;
use crate::transfer::TransferError;
use crate::wallet::WalletError;

/// Any failure that ends a tool run with exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum XchainError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Balance(#[from] BalanceError),
}

impl XchainError {
    /// Short category for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            XchainError::Config(_) => "config",
            XchainError::Account(_) => "account",
            XchainError::Transfer(TransferError::InsufficientBalance(_)) => "insufficient_balance",
            XchainError::Transfer(_) => "transfer",
            XchainError::Conversion(_) => "conversion",
            XchainError::Wallet(_) => "wallet",
            XchainError::Balance(_) => "balance",
        }
    }
}
