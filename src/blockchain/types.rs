// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network and chain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Avalanche network configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Short network key (`fuji`, `mainnet`)
    pub key: &'static str,
    /// C-Chain EVM chain ID
    pub chain_id: u64,
    /// Bech32 human-readable part for X/P-Chain addresses
    pub hrp: &'static str,
    /// Public API node base URL
    pub api_url: &'static str,
    /// Glacier data API base URL
    pub glacier_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Avalanche Mainnet configuration.
pub const AVAX_MAINNET: NetworkConfig = NetworkConfig {
    name: "Avalanche Mainnet",
    key: NETWORK_MAINNET,
    chain_id: 43114,
    hrp: "avax",
    api_url: "https://api.avax.network",
    glacier_url: "https://glacier-api.avax.network",
    explorer_url: "https://subnets.avax.network",
};

/// Avalanche Fuji Testnet configuration.
pub const AVAX_FUJI: NetworkConfig = NetworkConfig {
    name: "Avalanche Fuji Testnet",
    key: NETWORK_FUJI,
    chain_id: 43113,
    hrp: "fuji",
    api_url: "https://api.avax-test.network",
    glacier_url: "https://glacier-api.avax.network",
    explorer_url: "https://subnets-test.avax.network",
};

/// Default network identifier.
pub const NETWORK_FUJI: &str = "fuji";

/// Mainnet network identifier.
pub const NETWORK_MAINNET: &str = "mainnet";

/// Resolve a network name to its configuration.
///
/// `None` selects Fuji. Matching is case-insensitive and ignores surrounding
/// whitespace.
pub fn resolve_network(raw: Option<&str>) -> Result<NetworkConfig, String> {
    let value = raw.unwrap_or(NETWORK_FUJI).trim().to_ascii_lowercase();
    match value.as_str() {
        NETWORK_FUJI => Ok(AVAX_FUJI),
        NETWORK_MAINNET => Ok(AVAX_MAINNET),
        other => Err(format!(
            "unsupported network `{other}` (expected `{NETWORK_FUJI}` or `{NETWORK_MAINNET}`)"
        )),
    }
}

/// Primary network chain involved in an atomic transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    /// Contract chain (account model, EVM)
    #[serde(rename = "C")]
    C,
    /// Platform chain (UTXO model)
    #[serde(rename = "P")]
    P,
}

impl Chain {
    /// Single-letter chain alias used by the node APIs.
    pub fn alias(self) -> &'static str {
        match self {
            Chain::C => "C",
            Chain::P => "P",
        }
    }

    /// Path segment used by the explorer (`c-chain`, `p-chain`).
    pub fn explorer_segment(self) -> &'static str {
        match self {
            Chain::C => "c-chain",
            Chain::P => "p-chain",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}
