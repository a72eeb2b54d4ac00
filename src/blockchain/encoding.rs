// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Checksummed hex, the `"encoding": "hex"` format of the Avalanche node APIs.
//!
//! The payload is followed by the last 4 bytes of its SHA-256 digest and the
//! whole is hex-encoded with a `0x` prefix.

use sha2::{Digest, Sha256};

const CHECKSUM_LEN: usize = 4;

/// Encode bytes as `0x`-prefixed hex with a trailing 4-byte checksum.
pub fn encode_checked_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut payload = Vec::with_capacity(bytes.len() + CHECKSUM_LEN);
    payload.extend_from_slice(bytes);
    payload.extend_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    format!("0x{}", alloy::hex::encode(payload))
}

/// Decode checksummed hex, verifying the trailing checksum.
pub fn decode_checked_hex(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    let trimmed = encoded.trim();
    let hex_str = trimmed
        .strip_prefix("0x")
        .ok_or(EncodingError::MissingPrefix)?;

    let mut bytes =
        alloy::hex::decode(hex_str).map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
    if bytes.len() < CHECKSUM_LEN {
        return Err(EncodingError::TooShort);
    }

    let checksum = bytes.split_off(bytes.len() - CHECKSUM_LEN);
    let digest = Sha256::digest(&bytes);
    if checksum[..] != digest[digest.len() - CHECKSUM_LEN..] {
        return Err(EncodingError::ChecksumMismatch);
    }
    Ok(bytes)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("hex payload must start with 0x")]
    MissingPrefix,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("payload shorter than its checksum")]
    TooShort,

    #[error("checksum mismatch")]
    ChecksumMismatch,
}
