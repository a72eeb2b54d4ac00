// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! AVAX amounts.
//!
//! Cross-chain transfers settle in nAVAX (9 decimals), the denomination used by
//! the P-Chain and by atomic memory. C-Chain balances are reported in wei
//! (18 decimals) and are truncated to whole nAVAX on conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Decimals of the nAVAX denomination.
pub const NANO_AVAX_DECIMALS: u8 = 9;

/// Decimals of the C-Chain wei denomination.
pub const WEI_DECIMALS: u8 = 18;

const NANO_AVAX_PER_AVAX: u64 = 10u64.pow(NANO_AVAX_DECIMALS as u32);
const WEI_PER_NANO_AVAX: u128 = 10u128.pow((WEI_DECIMALS - NANO_AVAX_DECIMALS) as u32);

/// A non-negative AVAX quantity, stored in nAVAX.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_nano_avax(nano_avax: u64) -> Self {
        Self(nano_avax)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a human-readable AVAX amount (e.g. `"0.001"`).
    pub fn parse_avax(amount: &str) -> Result<Self, AmountError> {
        let amount = amount.trim();
        if amount.is_empty() {
            return Err(AmountError::Empty);
        }

        let parts: Vec<&str> = amount.split('.').collect();
        if parts.len() > 2 {
            return Err(AmountError::InvalidNumber(amount.to_string()));
        }

        let whole_str = parts[0];
        let decimal_str = parts.get(1).copied().unwrap_or("");
        if whole_str.is_empty() && decimal_str.is_empty() {
            return Err(AmountError::InvalidNumber(amount.to_string()));
        }
        if !whole_str.chars().all(|c| c.is_ascii_digit())
            || !decimal_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AmountError::InvalidNumber(amount.to_string()));
        }

        let whole = if whole_str.is_empty() {
            0
        } else {
            whole_str
                .parse::<u64>()
                .map_err(|_| AmountError::Overflow)?
        };

        if decimal_str.len() > NANO_AVAX_DECIMALS as usize {
            return Err(AmountError::TooManyDecimals {
                max: NANO_AVAX_DECIMALS,
            });
        }
        // Pad with zeros to match decimals
        let padded = format!(
            "{:0<width$}",
            decimal_str,
            width = NANO_AVAX_DECIMALS as usize
        );
        let fraction = padded
            .parse::<u64>()
            .map_err(|_| AmountError::InvalidNumber(amount.to_string()))?;

        whole
            .checked_mul(NANO_AVAX_PER_AVAX)
            .and_then(|w| w.checked_add(fraction))
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Convert a wei amount to nAVAX, dropping anything below 1 nAVAX.
    pub fn from_wei(wei: u128) -> Result<Self, AmountError> {
        u64::try_from(wei / WEI_PER_NANO_AVAX)
            .map(Self)
            .map_err(|_| AmountError::Overflow)
    }

    /// Parse a wei amount given as a decimal integer string.
    pub fn from_wei_str(wei: &str) -> Result<Self, AmountError> {
        let wei = wei.trim();
        if wei.is_empty() {
            return Err(AmountError::Empty);
        }
        let raw = wei
            .parse::<u128>()
            .map_err(|_| AmountError::InvalidNumber(wei.to_string()))?;
        Self::from_wei(raw)
    }

    /// Parse an nAVAX amount given as a decimal integer string.
    pub fn from_nano_avax_str(nano_avax: &str) -> Result<Self, AmountError> {
        let nano_avax = nano_avax.trim();
        if nano_avax.is_empty() {
            return Err(AmountError::Empty);
        }
        nano_avax
            .parse::<u64>()
            .map(Self)
            .map_err(|_| AmountError::InvalidNumber(nano_avax.to_string()))
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Format with exactly six decimals, rounding half up.
    pub fn fixed6(self) -> String {
        let micro = (u128::from(self.0) + 500) / 1_000;
        format!("{}.{:06}", micro / 1_000_000, micro % 1_000_000)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / NANO_AVAX_PER_AVAX;
        let remainder = self.0 % NANO_AVAX_PER_AVAX;

        if remainder == 0 {
            return write!(f, "{whole}");
        }

        let decimal_str = format!(
            "{:0>width$}",
            remainder,
            width = NANO_AVAX_DECIMALS as usize
        );
        write!(f, "{}.{}", whole, decimal_str.trim_end_matches('0'))
    }
}

/// Errors produced when parsing or converting amounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("`{0}` is not a valid decimal amount")]
    InvalidNumber(String),

    #[error("too many decimal places (max {max})")]
    TooManyDecimals { max: u8 },

    #[error("amount overflow")]
    Overflow,
}
