// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Minimal JSON-RPC 2.0 transport over `reqwest`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize + ?Sized> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a P,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC client shared by the node and transaction-builder clients.
#[derive(Debug)]
pub struct JsonRpcClient {
    http: Client,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(timeout: Duration) -> Result<Self, RpcError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RpcError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            next_id: AtomicU64::new(1),
        })
    }

    /// Call `method` on `url` and deserialize the `result` member.
    pub async fn call<P, R>(&self, url: &str, method: &str, params: &P) -> Result<R, RpcError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::debug!(%url, %method, id, "JSON-RPC request");

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(format!("{method} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::Status {
                method: method.to_string(),
                status,
                body,
            });
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::InvalidResponse(format!("{method} invalid JSON: {e}")))?;

        if let Some(error) = envelope.error {
            return Err(RpcError::Remote {
                method: method.to_string(),
                code: error.code,
                message: error.message,
            });
        }

        let result = envelope
            .result
            .ok_or_else(|| RpcError::InvalidResponse(format!("{method} returned no result")))?;

        serde_json::from_value(result)
            .map_err(|e| RpcError::InvalidResponse(format!("{method} unexpected result: {e}")))
    }
}

/// Errors raised by the JSON-RPC transport.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("{method} returned HTTP {status}: {body}")]
    Status {
        method: String,
        status: u16,
        body: String,
    },

    #[error("{method} failed ({code}): {message}")]
    Remote {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}
