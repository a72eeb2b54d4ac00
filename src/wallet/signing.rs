// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing prepared atomic and P-Chain transactions.
//!
//! A signed transaction is the unsigned bytes followed by the credential list:
//!
//! ```text
//! unsigned_tx | u32 credential count | { u32 type id | u32 sig count | sig (65 bytes) * n } *
//! ```
//!
//! Every signature covers `sha256(unsigned_tx)`. Credentials are secp256k1fx
//! credentials (type id 9 in both the platformvm and coreth codecs).

use sha2::{Digest, Sha256};

use super::{PreparedTxn, WalletError};
use crate::blockchain::AvalancheAccount;

/// Codec type id of `secp256k1fx.Credential`.
pub const SECP256K1_CREDENTIAL_TYPE_ID: u32 = 9;

/// Sign `prepared` with `account`, returning the signed transaction bytes.
///
/// Fails with [`WalletError::UnknownSigner`] if any credential names a signer
/// other than `account`.
pub fn sign_prepared(
    account: &AvalancheAccount,
    prepared: &PreparedTxn,
) -> Result<Vec<u8>, WalletError> {
    if prepared.unsigned_tx.is_empty() {
        return Err(WalletError::InvalidPreparedTx(
            "unsigned transaction is empty".to_string(),
        ));
    }

    if let Some(foreign) = prepared
        .credentials
        .iter()
        .flatten()
        .find(|signer| !account.controls(signer))
    {
        return Err(WalletError::UnknownSigner(foreign.clone()));
    }

    let digest: [u8; 32] = Sha256::digest(&prepared.unsigned_tx).into();
    let signature = account
        .sign_digest(&digest)
        .map_err(|e| WalletError::Signing(e.to_string()))?;

    let credential_count = u32::try_from(prepared.credentials.len())
        .map_err(|_| WalletError::InvalidPreparedTx("too many credentials".to_string()))?;

    let sig_total: usize = prepared.credentials.iter().map(Vec::len).sum();
    let mut signed = Vec::with_capacity(
        prepared.unsigned_tx.len()
            + 4
            + prepared.credentials.len() * 8
            + sig_total * signature.len(),
    );
    signed.extend_from_slice(&prepared.unsigned_tx);
    signed.extend_from_slice(&credential_count.to_be_bytes());

    for signers in &prepared.credentials {
        let sig_count = u32::try_from(signers.len())
            .map_err(|_| WalletError::InvalidPreparedTx("too many signers".to_string()))?;
        signed.extend_from_slice(&SECP256K1_CREDENTIAL_TYPE_ID.to_be_bytes());
        signed.extend_from_slice(&sig_count.to_be_bytes());
        for _ in signers {
            signed.extend_from_slice(&signature);
        }
    }

    Ok(signed)
}
