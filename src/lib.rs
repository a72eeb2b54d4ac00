// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational XChain - Avalanche C-Chain / P-Chain tooling
//!
//! Moves AVAX between the C-Chain and the P-Chain through atomic
//! export/import pairs, and converts a subnet into an L1.
//!
//! ## Modules
//!
//! - `app` - Entry points used by the binaries
//! - `balance` - Pre-flight balance checks (Glacier, P-Chain node)
//! - `blockchain` - Networks, amounts, accounts and encodings
//! - `config` - Environment configuration
//! - `conversion` - Subnet-to-L1 conversion
//! - `report` - Console progress output and explorer links
//! - `transfer` - C→P and P→C transfer orchestration
//! - `wallet` - Transaction building, signing, issuance and confirmation

pub mod app;
pub mod balance;
pub mod blockchain;
pub mod config;
pub mod conversion;
pub mod error;
pub mod logging;
pub mod report;
pub mod transfer;
pub mod wallet;

pub use error::XchainError;
