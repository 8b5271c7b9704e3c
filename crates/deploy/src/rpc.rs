//! Shared RPC utilities for interacting with Ethereum JSON-RPC endpoints.

use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Default timeout for RPC requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default interval between polling attempts when waiting for a result.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Create the HTTP client used to talk to the deployment node.
pub fn create_client() -> Result<reqwest::Client, anyhow::Error> {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .context("Failed to build the node HTTP client")
}

/// Call `method` on the node at `url` and deserialize its `result`.
///
/// A JSON-RPC `error` object becomes an error carrying the node's message.
pub async fn json_rpc_call<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    method: &str,
    params: Vec<Value>,
) -> Result<T, anyhow::Error> {
    let request = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    });

    let response: Value = client
        .post(url)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("Node at {url} did not answer {method}"))?
        .json()
        .await
        .with_context(|| format!("Node at {url} sent a malformed {method} response"))?;

    parse_rpc_response(method, response)
}

/// Extract the `result` of a JSON-RPC response, turning an `error` object into an error.
fn parse_rpc_response<T: DeserializeOwned>(
    method: &str,
    response: Value,
) -> Result<T, anyhow::Error> {
    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        anyhow::bail!("{method} rejected by the node: {message}");
    }

    let result = response
        .get("result")
        .cloned()
        .with_context(|| format!("{method} response carries no result"))?;

    serde_json::from_value(result).with_context(|| format!("Unexpected {method} result shape"))
}

/// Poll until `poll_fn` yields a value.
///
/// # Arguments
/// * `name` - What is being waited for (for error messages)
/// * `timeout` - Maximum time to wait
/// * `poll_interval` - Delay between attempts
/// * `poll_fn` - Returns `Ok(Some(_))` when done, `Ok(None)` to keep waiting
///
/// Errors returned by `poll_fn` abort the wait immediately.
pub async fn poll_until<T, F, Fut>(
    name: &str,
    timeout: Duration,
    poll_interval: Duration,
    poll_fn: F,
) -> Result<T, anyhow::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Option<T>, anyhow::Error>>,
{
    let start = std::time::Instant::now();

    loop {
        if let Some(value) = poll_fn().await? {
            return Ok(value);
        }

        if start.elapsed() > timeout {
            anyhow::bail!("Timeout waiting for {}", name);
        }

        tracing::trace!(name = %name, "Not ready yet, polling again...");
        tokio::time::sleep(poll_interval).await;
    }
}
