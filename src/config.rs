// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Every tool reads its configuration from the environment once at startup
//! (after loading an optional `.env` file) into an explicit config struct that
//! is passed by reference from there on.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PRIVATE_KEY` | Hex secp256k1 key controlling both chains | Required |
//! | `TRANSFER_AMOUNT` | AVAX to move, decimal string | `0.001` |
//! | `NETWORK` | `fuji` or `mainnet` | `fuji` |
//! | `AVALANCHE_API_URL` | API node base URL | network default |
//! | `GLACIER_API_URL` | Glacier data API base URL | network default |
//! | `TX_BUILDER_URL` | Transaction builder JSON-RPC endpoint | `http://127.0.0.1:9660/rpc` |
//! | `TX_CONFIRM_TIMEOUT_SECS` | Max wait for acceptance | `120` |
//! | `SUBNET_ID` | Subnet to convert | Required (conversion) |
//! | `BLOCKCHAIN_ID` | Chain hosting the validator manager | Required (conversion) |
//! | `MANAGER_CONTRACT_ADDRESS` | Validator manager contract | Required (conversion) |
//! | `NODE_ID` | Initial validator node id | Required (conversion) |
//! | `NODE_PUBLIC_KEY` | Validator BLS public key | Required (conversion) |
//! | `NODE_PROOF_OF_POSSESSION` | Validator BLS proof of possession | Required (conversion) |
//! | `VALIDATOR_WEIGHT` | Initial validator weight | `100` |
//! | `VALIDATOR_BALANCE` | Initial validator balance in AVAX | `0.1` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `warn` |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use url::Url;

use crate::blockchain::{resolve_network, Amount, NetworkConfig};

pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const TRANSFER_AMOUNT_ENV: &str = "TRANSFER_AMOUNT";
pub const NETWORK_ENV: &str = "NETWORK";
pub const AVALANCHE_API_URL_ENV: &str = "AVALANCHE_API_URL";
pub const GLACIER_API_URL_ENV: &str = "GLACIER_API_URL";
pub const TX_BUILDER_URL_ENV: &str = "TX_BUILDER_URL";
pub const TX_CONFIRM_TIMEOUT_SECS_ENV: &str = "TX_CONFIRM_TIMEOUT_SECS";
pub const SUBNET_ID_ENV: &str = "SUBNET_ID";
pub const BLOCKCHAIN_ID_ENV: &str = "BLOCKCHAIN_ID";
pub const MANAGER_CONTRACT_ADDRESS_ENV: &str = "MANAGER_CONTRACT_ADDRESS";
pub const NODE_ID_ENV: &str = "NODE_ID";
pub const NODE_PUBLIC_KEY_ENV: &str = "NODE_PUBLIC_KEY";
pub const NODE_PROOF_OF_POSSESSION_ENV: &str = "NODE_PROOF_OF_POSSESSION";
pub const VALIDATOR_WEIGHT_ENV: &str = "VALIDATOR_WEIGHT";
pub const VALIDATOR_BALANCE_ENV: &str = "VALIDATOR_BALANCE";

pub const DEFAULT_TRANSFER_AMOUNT: &str = "0.001";
pub const DEFAULT_TX_BUILDER_URL: &str = "http://127.0.0.1:9660/rpc";
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_VALIDATOR_WEIGHT: u64 = 100;
pub const DEFAULT_VALIDATOR_BALANCE: &str = "0.1";

/// BLS12-381 compressed public key length.
const BLS_PUBLIC_KEY_LEN: usize = 48;
/// BLS12-381 signature length.
const BLS_SIGNATURE_LEN: usize = 96;

/// Private key material. `Debug` never prints the value.
#[derive(Clone)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Network and service endpoints.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub network: NetworkConfig,
    pub api_url: Url,
    pub glacier_url: Url,
    pub builder_url: Url,
    pub confirm_timeout: Duration,
}

/// Account key plus endpoints, shared by every tool.
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub private_key: PrivateKey,
    pub endpoints: EndpointConfig,
}

/// Configuration of the C→P and P→C transfer tools.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    pub account: AccountConfig,
    pub amount: Amount,
}

/// Configuration of the subnet-to-L1 conversion tool.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub account: AccountConfig,
    pub subnet_id: String,
    pub blockchain_id: String,
    pub manager_contract_address: String,
    pub node_id: String,
    pub node_public_key: String,
    pub node_proof_of_possession: String,
    pub validator_weight: u64,
    pub validator_balance: Amount,
}

/// Variable lookup used by the loaders. `std::env::var` in production.
pub trait EnvLookup {
    fn get(&self, name: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl EndpointConfig {
    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self, ConfigError> {
        let network = resolve_network(env_optional(env, NETWORK_ENV).as_deref()).map_err(
            |reason| ConfigError::Invalid {
                name: NETWORK_ENV,
                reason,
            },
        )?;

        let api_url = env_url(env, AVALANCHE_API_URL_ENV, network.api_url)?;
        let glacier_url = env_url(env, GLACIER_API_URL_ENV, network.glacier_url)?;
        let builder_url = env_url(env, TX_BUILDER_URL_ENV, DEFAULT_TX_BUILDER_URL)?;

        let timeout_secs = match env_optional(env, TX_CONFIRM_TIMEOUT_SECS_ENV) {
            Some(raw) => parse_positive_u64(TX_CONFIRM_TIMEOUT_SECS_ENV, &raw)?,
            None => DEFAULT_CONFIRM_TIMEOUT_SECS,
        };

        Ok(Self {
            network,
            api_url,
            glacier_url,
            builder_url,
            confirm_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AccountConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self, ConfigError> {
        let private_key = PrivateKey(env_required(env, PRIVATE_KEY_ENV)?);
        let endpoints = EndpointConfig::from_lookup(env)?;
        Ok(Self {
            private_key,
            endpoints,
        })
    }
}

impl TransferConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self, ConfigError> {
        let account = AccountConfig::from_lookup(env)?;
        let raw_amount = env_or_default(env, TRANSFER_AMOUNT_ENV, DEFAULT_TRANSFER_AMOUNT);
        let amount = parse_avax(TRANSFER_AMOUNT_ENV, &raw_amount)?;
        if amount.is_zero() {
            return Err(ConfigError::Invalid {
                name: TRANSFER_AMOUNT_ENV,
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self { account, amount })
    }
}

impl ConversionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self, ConfigError> {
        let account = AccountConfig::from_lookup(env)?;

        let subnet_id = env_required(env, SUBNET_ID_ENV)?;
        let blockchain_id = env_required(env, BLOCKCHAIN_ID_ENV)?;
        let manager_contract_address = env_required(env, MANAGER_CONTRACT_ADDRESS_ENV)?;
        let node_id = env_required(env, NODE_ID_ENV)?;
        let node_public_key = env_required(env, NODE_PUBLIC_KEY_ENV)?;
        let node_proof_of_possession = env_required(env, NODE_PROOF_OF_POSSESSION_ENV)?;

        Address::from_str(&manager_contract_address).map_err(|e| ConfigError::Invalid {
            name: MANAGER_CONTRACT_ADDRESS_ENV,
            reason: e.to_string(),
        })?;
        if !node_id.starts_with("NodeID-") {
            return Err(ConfigError::Invalid {
                name: NODE_ID_ENV,
                reason: "must start with `NodeID-`".to_string(),
            });
        }
        check_hex_len(NODE_PUBLIC_KEY_ENV, &node_public_key, BLS_PUBLIC_KEY_LEN)?;
        check_hex_len(
            NODE_PROOF_OF_POSSESSION_ENV,
            &node_proof_of_possession,
            BLS_SIGNATURE_LEN,
        )?;

        let validator_weight = match env_optional(env, VALIDATOR_WEIGHT_ENV) {
            Some(raw) => parse_positive_u64(VALIDATOR_WEIGHT_ENV, &raw)?,
            None => DEFAULT_VALIDATOR_WEIGHT,
        };
        let validator_balance = parse_avax(
            VALIDATOR_BALANCE_ENV,
            &env_or_default(env, VALIDATOR_BALANCE_ENV, DEFAULT_VALIDATOR_BALANCE),
        )?;

        Ok(Self {
            account,
            subnet_id,
            blockchain_id,
            manager_contract_address,
            node_id,
            node_public_key,
            node_proof_of_possession,
            validator_weight,
            validator_balance,
        })
    }
}

fn env_required(env: &impl EnvLookup, name: &'static str) -> Result<String, ConfigError> {
    env_optional(env, name).ok_or(ConfigError::Missing(name))
}

fn env_optional(env: &impl EnvLookup, name: &str) -> Option<String> {
    env.get(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_or_default(env: &impl EnvLookup, name: &str, default: &str) -> String {
    env_optional(env, name).unwrap_or_else(|| default.to_string())
}

fn env_url(env: &impl EnvLookup, name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env_or_default(env, name, default);
    let url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_avax(name: &'static str, raw: &str) -> Result<Amount, ConfigError> {
    Amount::parse_avax(raw).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

fn parse_positive_u64(name: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::Invalid {
            name,
            reason: format!("`{raw}`: {e}"),
        }),
    }
}

fn check_hex_len(name: &'static str, value: &str, expected: usize) -> Result<(), ConfigError> {
    let hex_str = value.strip_prefix("0x").unwrap_or(value);
    let bytes = alloy::hex::decode(hex_str).map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })?;
    if bytes.len() != expected {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("expected {expected} bytes, got {}", bytes.len()),
        });
    }
    Ok(())
}

/// Configuration errors. Always name the offending variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}
