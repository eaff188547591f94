//! JSON-RPC plumbing for talking to the parent chain.
//!
//! The [`ParentChainClient`] trait is the only network seam of the crate: every
//! operation that touches the parent chain goes through it, which keeps the
//! orchestrator testable against an in-memory chain.

use std::{future::Future, time::Duration};

use alloy_core::primitives::{Address, Bytes, TxHash, U64, U128, U256};
use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use url::Url;

use crate::receipt::TransactionReceipt;

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default interval between polling attempts when waiting for a receipt.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Create an HTTP client configured for JSON-RPC requests.
pub fn create_client() -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")
}

/// Make a JSON-RPC call and deserialize the result.
///
/// # Arguments
/// * `client` - The HTTP client to use
/// * `url` - The RPC endpoint URL
/// * `method` - The RPC method name
/// * `params` - The method parameters
///
/// # Returns
/// The deserialized result, or an error if the request failed or returned an error response.
pub async fn json_rpc_call<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    method: &str,
    params: Vec<Value>,
) -> Result<T, anyhow::Error> {
    let response = client
        .post(url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .send()
        .await
        .with_context(|| format!("Failed to send {} request", method))?;

    let result: Value = response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", method))?;

    if let Some(error) = result.get("error") {
        anyhow::bail!(
            "RPC error on {}: {}",
            method,
            error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown")
        );
    }

    let result_value = result
        .get("result")
        .context("No result in response")?
        .clone();

    serde_json::from_value(result_value)
        .with_context(|| format!("Failed to deserialize {} result", method))
}

/// A call or transaction request as sent to `eth_call` / `eth_estimateGas`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: Bytes,
}

/// Read and write access to the parent chain.
///
/// Implementations hold no signing identity: the submitting account is always
/// passed in explicitly by the caller.
pub trait ParentChainClient: Send + Sync {
    /// `eth_chainId`.
    fn chain_id(&self) -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// `eth_getTransactionCount` at the `pending` block.
    fn transaction_count(&self, address: Address)
    -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// `eth_estimateGas`.
    fn estimate_gas(&self, request: &CallRequest)
    -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// `eth_gasPrice`.
    fn gas_price(&self) -> impl Future<Output = anyhow::Result<u128>> + Send;

    /// `eth_maxPriorityFeePerGas`.
    fn max_priority_fee_per_gas(&self) -> impl Future<Output = anyhow::Result<u128>> + Send;

    /// `eth_call` at the `latest` block.
    fn call(&self, request: &CallRequest) -> impl Future<Output = anyhow::Result<Bytes>> + Send;

    /// `eth_sendRawTransaction`.
    fn send_raw_transaction(&self, raw: &Bytes)
    -> impl Future<Output = anyhow::Result<TxHash>> + Send;

    /// `eth_getTransactionReceipt`. Returns `None` while the transaction is pending.
    fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = anyhow::Result<Option<TransactionReceipt>>> + Send;
}

/// [`ParentChainClient`] over HTTP JSON-RPC.
#[derive(Debug, Clone)]
pub struct HttpParentChainClient {
    client: reqwest::Client,
    url: Url,
}

impl HttpParentChainClient {
    /// Create a client for the given RPC endpoint.
    pub fn new(url: Url) -> Result<Self, anyhow::Error> {
        Ok(Self {
            client: create_client()?,
            url,
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> anyhow::Result<T> {
        tracing::trace!(method, url = %self.url, "JSON-RPC request");
        json_rpc_call(&self.client, self.url.as_str(), method, params).await
    }
}

impl ParentChainClient for HttpParentChainClient {
    async fn chain_id(&self) -> anyhow::Result<u64> {
        let id: U64 = self.request("eth_chainId", vec![]).await?;
        Ok(id.to())
    }

    async fn transaction_count(&self, address: Address) -> anyhow::Result<u64> {
        let nonce: U64 = self
            .request(
                "eth_getTransactionCount",
                vec![serde_json::json!(address), serde_json::json!("pending")],
            )
            .await?;
        Ok(nonce.to())
    }

    async fn estimate_gas(&self, request: &CallRequest) -> anyhow::Result<u64> {
        let gas: U64 = self
            .request("eth_estimateGas", vec![serde_json::to_value(request)?])
            .await?;
        Ok(gas.to())
    }

    async fn gas_price(&self) -> anyhow::Result<u128> {
        let price: U128 = self.request("eth_gasPrice", vec![]).await?;
        Ok(price.to())
    }

    async fn max_priority_fee_per_gas(&self) -> anyhow::Result<u128> {
        let fee: U128 = self.request("eth_maxPriorityFeePerGas", vec![]).await?;
        Ok(fee.to())
    }

    async fn call(&self, request: &CallRequest) -> anyhow::Result<Bytes> {
        self.request(
            "eth_call",
            vec![serde_json::to_value(request)?, serde_json::json!("latest")],
        )
        .await
    }

    async fn send_raw_transaction(&self, raw: &Bytes) -> anyhow::Result<TxHash> {
        self.request("eth_sendRawTransaction", vec![serde_json::json!(raw)])
            .await
    }

    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> anyhow::Result<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", vec![serde_json::json!(hash)])
            .await
    }
}

/// Poll `check_fn` until it yields a value.
///
/// # Arguments
/// * `name` - What is being waited for (for error messages)
/// * `timeout` - Maximum time to wait
/// * `interval` - Delay between attempts
/// * `check_fn` - Returns `Ok(Some(_))` when done, `Ok(None)` to keep waiting
///
/// Errors returned by `check_fn` are logged and retried until the timeout, and the last
/// one is attached to the timeout error. A response that fails to deserialize is returned
/// immediately since retrying cannot fix it.
pub async fn poll_until<T, F, Fut>(
    name: &str,
    timeout: Duration,
    interval: Duration,
    check_fn: F,
) -> Result<T, anyhow::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Option<T>, anyhow::Error>>,
{
    let start = std::time::Instant::now();
    let mut last_err = None;

    loop {
        match check_fn().await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {
                tracing::trace!(target_name = %name, "Not available yet, retrying...");
            }
            Err(e) if is_decode_error(&e) => {
                return Err(e.context(format!("Invalid response while waiting for {}", name)));
            }
            Err(e) => {
                tracing::debug!(error = %e, target_name = %name, "Poll attempt failed, retrying...");
                last_err = Some(e);
            }
        }

        if start.elapsed() + interval > timeout {
            let message = format!("Timeout waiting for {} after {:?}", name, timeout);
            return Err(match last_err {
                Some(e) => e.context(message),
                None => anyhow::anyhow!(message),
            });
        }

        tokio::time::sleep(interval).await;
    }
}

fn is_decode_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| cause.is::<serde_json::Error>())
}

/// Wait until the receipt for `hash` is available.
pub async fn wait_for_transaction_receipt<C: ParentChainClient>(
    client: &C,
    hash: TxHash,
    timeout: Duration,
    interval: Duration,
) -> Result<TransactionReceipt, anyhow::Error> {
    tracing::debug!(tx_hash = %hash, ?timeout, "Waiting for transaction receipt");

    poll_until(
        &format!("receipt of transaction {}", hash),
        timeout,
        interval,
        || client.transaction_receipt(hash),
    )
    .await
}
