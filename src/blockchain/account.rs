// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account derivation for the C-Chain and the X/P-Chains.
//!
//! A single secp256k1 key controls both an EVM address on the C-Chain and a
//! bech32 short-id address on the X/P-Chains:
//!
//! - C-Chain: `keccak256(uncompressed_pubkey)[12..]`, EIP-55 checksummed
//! - P-Chain: `P-` + bech32(hrp, `ripemd160(sha256(compressed_pubkey))`)

use std::fmt;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use bech32::{Bech32, Hrp};
use k256::ecdsa::SigningKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use super::types::{Chain, NetworkConfig};

/// Length of a recoverable secp256k1 signature (`r || s || v`).
pub const SIGNATURE_LEN: usize = 65;

/// Keys and addresses derived from one private key.
#[derive(Clone)]
pub struct AvalancheAccount {
    signing_key: SigningKey,
    evm_address: Address,
    xp_address: String,
    public_key: Vec<u8>,
}

impl AvalancheAccount {
    /// Derive an account from a hex-encoded private key (with or without `0x`).
    pub fn from_private_key_hex(
        private_key_hex: &str,
        network: &NetworkConfig,
    ) -> Result<Self, AccountError> {
        let trimmed = private_key_hex.trim();
        let hex_str = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let key_bytes = alloy::hex::decode(hex_str)
            .map_err(|e| AccountError::InvalidPrivateKey(e.to_string()))?;
        if key_bytes.len() != 32 {
            return Err(AccountError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                key_bytes.len()
            )));
        }

        let signing_key = SigningKey::from_slice(&key_bytes)
            .map_err(|e| AccountError::InvalidPrivateKey(e.to_string()))?;
        let evm_address = PrivateKeySigner::from_signing_key(signing_key.clone()).address();

        let public_key = signing_key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        let xp_address = public_key_to_xp_address(&public_key, network.hrp)?;

        Ok(Self {
            signing_key,
            evm_address,
            xp_address,
            public_key,
        })
    }

    /// EIP-55 checksummed C-Chain address.
    pub fn evm_address(&self) -> String {
        self.evm_address.to_checksum(None)
    }

    /// Chain-prefixed X/P address (e.g. `P-fuji1...`).
    pub fn xp_address(&self, chain_prefix: &str) -> String {
        format!("{}-{}", chain_prefix, self.xp_address)
    }

    /// P-Chain address (`P-<hrp>1...`).
    pub fn p_chain_address(&self) -> String {
        self.xp_address(Chain::P.alias())
    }

    /// Compressed SEC1 public key (33 bytes).
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Whether this account can sign for `address`.
    ///
    /// Accepts the EVM address (any hex case) and the bech32 address with or
    /// without an `X-`, `P-` or `C-` prefix.
    pub fn controls(&self, address: &str) -> bool {
        let address = address.trim();
        if address.starts_with("0x") || address.starts_with("0X") {
            return address.eq_ignore_ascii_case(&self.evm_address.to_string());
        }
        let body = address
            .split_once('-')
            .map(|(_, rest)| rest)
            .unwrap_or(address);
        body == self.xp_address
    }

    /// Sign a 32-byte digest, returning `r || s || v` with `v` in `{0, 1}`.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<[u8; SIGNATURE_LEN], AccountError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| AccountError::Signing(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        Ok(out)
    }
}

impl fmt::Debug for AvalancheAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvalancheAccount")
            .field("evm_address", &self.evm_address())
            .field("xp_address", &self.xp_address)
            .finish_non_exhaustive()
    }
}

/// Encode a compressed public key as a bech32 X/P address body (`<hrp>1...`).
pub fn public_key_to_xp_address(public_key: &[u8], hrp: &str) -> Result<String, AccountError> {
    let sha = Sha256::digest(public_key);
    let short_id = Ripemd160::digest(sha);

    let hrp = Hrp::parse(hrp).map_err(|e| AccountError::AddressEncoding(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, &short_id)
        .map_err(|e| AccountError::AddressEncoding(e.to_string()))
}

/// Errors that can occur while deriving or using an account.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Failed to encode address: {0}")]
    AddressEncoding(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}
