// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Glacier data API client for native C-Chain balances.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::BalanceError;
use crate::blockchain::Amount;

/// Glacier requests are a pre-flight check; fail fast rather than stall.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for `GET /v1/chains/{chainId}/addresses/{address}/balances:getNative`.
#[derive(Debug, Clone)]
pub struct GlacierClient {
    base_url: Url,
    chain_id: u64,
    http: Client,
}

impl GlacierClient {
    pub fn new(base_url: Url, chain_id: u64) -> Result<Self, BalanceError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BalanceError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            chain_id,
            http,
        })
    }

    /// URL of the native balance endpoint for `address`.
    pub fn native_balance_url(&self, address: &str) -> String {
        format!(
            "{}/v1/chains/{}/addresses/{}/balances:getNative",
            self.base_url.as_str().trim_end_matches('/'),
            self.chain_id,
            address
        )
    }

    /// Native AVAX balance of `address`.
    pub async fn native_balance(&self, address: &str) -> Result<Amount, BalanceError> {
        let url = self.native_balance_url(address);
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| BalanceError::Request(format!("GET {url} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BalanceError::Request(format!(
                "GET {url} returned {status}: {body}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BalanceError::InvalidResponse(format!("invalid JSON: {e}")))?;

        parse_native_balance(&body)
    }
}

/// Read `nativeTokenBalance.balance` (wei). An absent field means zero.
pub fn parse_native_balance(body: &Value) -> Result<Amount, BalanceError> {
    match body.pointer("/nativeTokenBalance/balance") {
        None | Some(Value::Null) => Ok(Amount::ZERO),
        Some(Value::String(raw)) => Amount::from_wei_str(raw)
            .map_err(|e| BalanceError::InvalidResponse(format!("balance `{raw}`: {e}"))),
        Some(Value::Number(n)) => {
            let wei = number_to_wei(n).ok_or_else(|| {
                BalanceError::InvalidResponse(format!("balance `{n}` is not a whole number"))
            })?;
            Amount::from_wei(wei).map_err(|e| BalanceError::InvalidResponse(e.to_string()))
        }
        Some(other) => Err(BalanceError::InvalidResponse(format!(
            "unexpected balance value `{other}`"
        ))),
    }
}

/// Wei from a JSON number.
///
/// Integers above `u64::MAX` arrive as `f64`; its rounding error is far below
/// 1 nAVAX, which is all [`Amount::from_wei`] keeps.
fn number_to_wei(n: &serde_json::Number) -> Option<u128> {
    if let Some(wei) = n.as_u64() {
        return Some(u128::from(wei));
    }
    let wei = n.as_f64()?;
    if !wei.is_finite() || wei < 0.0 || wei.fract() != 0.0 || wei >= u128::MAX as f64 {
        return None;
    }
    Some(wei as u128)
}
