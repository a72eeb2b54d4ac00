// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Avalanche primitives shared by the transfer and conversion tools.
//!
//! This module provides:
//! - Network configuration (Fuji, Mainnet) and chain aliases
//! - AVAX amount parsing and formatting
//! - Account derivation for C-Chain and P-Chain addresses
//! - The checksummed hex encoding used by the node APIs

pub mod account;
pub mod amount;
pub mod encoding;
pub mod types;

pub use account::{AccountError, AvalancheAccount};
pub use amount::{Amount, AmountError};
pub use types::*;
