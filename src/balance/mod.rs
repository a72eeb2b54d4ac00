// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Pre-flight balance checks.
//!
//! Balances are best-effort: a failed query is logged and treated as zero,
//! which then fails the sufficiency gate rather than letting a transfer
//! proceed on a guess. [`BalanceCheck`] keeps the two outcomes apart so
//! callers can tell an observed zero from a failed query.

pub mod glacier;

use async_trait::async_trait;

use crate::blockchain::{Amount, Chain};
use crate::wallet::{NodeRpc, RpcError};

pub use glacier::GlacierClient;

/// Extra balance kept on the source chain to cover fees (0.0001 AVAX).
pub const MIN_BALANCE_BUFFER: Amount = Amount::from_nano_avax(100_000);

/// Outcome of a best-effort balance query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceCheck {
    /// The source answered with this balance
    Observed(Amount),
    /// The query failed; the balance is treated as zero
    Unavailable { reason: String },
}

impl BalanceCheck {
    /// Balance to gate on: the observed value, or zero if the query failed.
    pub fn effective(&self) -> Amount {
        match self {
            BalanceCheck::Observed(amount) => *amount,
            BalanceCheck::Unavailable { .. } => Amount::ZERO,
        }
    }

    pub fn is_observed(&self) -> bool {
        matches!(self, BalanceCheck::Observed(_))
    }
}

/// Source of native AVAX balances.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn native_balance(&self, chain: Chain, address: &str) -> Result<Amount, BalanceError>;
}

/// Query `source`, downgrading any failure to [`BalanceCheck::Unavailable`].
pub async fn check_balance<S>(source: &S, chain: Chain, address: &str) -> BalanceCheck
where
    S: BalanceSource + ?Sized,
{
    match source.native_balance(chain, address).await {
        Ok(amount) => BalanceCheck::Observed(amount),
        Err(e) => {
            tracing::warn!(%chain, %address, error = %e, "Balance check failed, treating as zero");
            BalanceCheck::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

/// Amount plus [`MIN_BALANCE_BUFFER`].
pub fn required_balance(amount: Amount) -> Option<Amount> {
    amount.checked_add(MIN_BALANCE_BUFFER)
}

/// Fail unless `observed` covers `amount` plus the fee buffer.
pub fn ensure_sufficient(
    chain: Chain,
    observed: Amount,
    amount: Amount,
) -> Result<(), InsufficientBalance> {
    let need = required_balance(amount).unwrap_or(Amount::from_nano_avax(u64::MAX));
    if observed < need {
        return Err(InsufficientBalance {
            chain,
            have: observed,
            need,
            amount,
            buffer: MIN_BALANCE_BUFFER,
        });
    }
    Ok(())
}

/// Production balances: Glacier for the C-Chain, the node for the P-Chain.
pub struct AvalancheBalances {
    glacier: GlacierClient,
    node: NodeRpc,
}

impl AvalancheBalances {
    pub fn new(glacier: GlacierClient, node: NodeRpc) -> Self {
        Self { glacier, node }
    }
}

#[async_trait]
impl BalanceSource for AvalancheBalances {
    async fn native_balance(&self, chain: Chain, address: &str) -> Result<Amount, BalanceError> {
        match chain {
            Chain::C => self.glacier.native_balance(address).await,
            Chain::P => Ok(self.node.platform_balance(address).await?),
        }
    }
}

/// The source chain cannot cover the transfer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Insufficient {chain}-Chain balance. Have: {} AVAX, Need: {} AVAX ({amount} + {buffer} for fees)",
    .have.fixed6(),
    .need.fixed6()
)]
pub struct InsufficientBalance {
    pub chain: Chain,
    pub have: Amount,
    pub need: Amount,
    pub amount: Amount,
    pub buffer: Amount,
}

/// Errors raised by balance sources.
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error("Balance request failed: {0}")]
    Request(String),

    #[error("Balance response was invalid: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Result<Amount, String>);

    #[async_trait]
    impl BalanceSource for FixedSource {
        async fn native_balance(&self, _: Chain, _: &str) -> Result<Amount, BalanceError> {
            self.0.clone().map_err(BalanceError::Request)
        }
    }

    fn avax(s: &str) -> Amount {
        Amount::parse_avax(s).unwrap()
    }

    #[test]
    fn gate_passes_with_enough_balance() {
        assert!(ensure_sufficient(Chain::C, avax("1"), avax("0.001")).is_ok());
        // Exactly amount + buffer is enough.
        assert!(ensure_sufficient(Chain::C, avax("0.0011"), avax("0.001")).is_ok());
    }

    #[test]
    fn gate_fails_below_amount_plus_buffer() {
        let err = ensure_sufficient(Chain::C, avax("0.001"), avax("0.001")).unwrap_err();
        assert_eq!(err.need, avax("0.0011"));
        assert_eq!(
            err.to_string(),
            "Insufficient C-Chain balance. Have: 0.001000 AVAX, Need: 0.001100 AVAX (0.001 + 0.0001 for fees)"
        );
    }

    #[test]
    fn gate_reports_zero_balance() {
        let err = ensure_sufficient(Chain::P, Amount::ZERO, avax("0.5")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Insufficient P-Chain balance"));
        assert!(message.contains("Have: 0.000000 AVAX"));
        assert!(message.contains("Need: 0.500100 AVAX"));
    }

    #[tokio::test]
    async fn check_balance_distinguishes_failure_from_zero() {
        let observed = check_balance(&FixedSource(Ok(Amount::ZERO)), Chain::C, "0xabc").await;
        assert_eq!(observed, BalanceCheck::Observed(Amount::ZERO));
        assert!(observed.is_observed());

        let failed =
            check_balance(&FixedSource(Err("connection refused".into())), Chain::C, "0xabc").await;
        assert!(!failed.is_observed());
        assert_eq!(failed.effective(), Amount::ZERO);
        match failed {
            BalanceCheck::Unavailable { reason } => assert!(reason.contains("connection refused")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }
}
