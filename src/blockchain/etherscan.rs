//! Etherscan REST client.
//!
//! # Responsibilities
//! - Issue `module`/`action` queries against an Etherscan-compatible API
//! - Enforce a deadline on every request
//! - Retry transport failures with backoff
//! - Map the two response dialects onto [`RemoteResponse`]:
//!   `proxy` calls answer JSON-RPC envelopes, `account` calls answer
//!   `{status, message, result}` where a failed status carries a bare message

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;
use url::Url;

use crate::blockchain::explorer::{
    BalanceEntry, Explorer, RawResponse, RawTransaction, RemoteFailure, RemoteResponse,
};
use crate::blockchain::types::{AdapterError, ExplorerConfig};
use crate::resilience::RetryPolicy;

/// Highest block accepted by `txlist` queries.
const TXLIST_END_BLOCK: &str = "99999999";

/// Etherscan API client.
#[derive(Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    timeout_secs: u64,
    retry: RetryPolicy,
}

impl EtherscanClient {
    /// Create a client for the given endpoint.
    pub fn new(base_url: Url, config: &ExplorerConfig, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            retry,
        }
    }

    /// Get the endpoint this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn query<T: DeserializeOwned>(
        &self,
        method: &'static str,
        module: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> RawResponse<T> {
        self.retry
            .run(method, RemoteFailure::is_retryable, || {
                self.query_once(module, action, params)
            })
            .await
    }

    async fn query_once<T: DeserializeOwned>(
        &self,
        module: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> RawResponse<T> {
        let url = self.request_url(module, action, params);

        let request = async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| RemoteFailure::Message(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteFailure::Message(format!("HTTP {}", status)));
            }

            let body = response.json::<Value>().await.map_err(|e| {
                RemoteFailure::from(AdapterError::Decode(format!("Invalid JSON body: {}", e)))
            })?;
            Ok::<Value, RemoteFailure>(body)
        };

        let body = match timeout(Duration::from_secs(self.timeout_secs), request).await {
            Ok(body) => body?,
            Err(_) => return Err(AdapterError::Timeout(self.timeout_secs).into()),
        };

        decode_body(body)
    }

    fn request_url(&self, module: &str, action: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("module", module).append_pair("action", action);
            for (key, value) in params {
                query.append_pair(key, value);
            }
            if !self.api_key.is_empty() {
                query.append_pair("apikey", &self.api_key);
            }
        }
        url
    }
}

#[async_trait]
impl Explorer for EtherscanClient {
    async fn get_block_number(&self) -> RawResponse<String> {
        self.query("eth_blockNumber", "proxy", "eth_blockNumber", &[])
            .await
    }

    async fn get_balance(&self, address: &str) -> RawResponse<Vec<BalanceEntry>> {
        self.query(
            "balancemulti",
            "account",
            "balancemulti",
            &[("address", address), ("tag", "latest")],
        )
        .await
    }

    async fn get_transaction_by_hash(&self, hash: &str) -> RawResponse<RawTransaction> {
        self.query(
            "eth_getTransactionByHash",
            "proxy",
            "eth_getTransactionByHash",
            &[("txhash", hash)],
        )
        .await
    }

    async fn list_transactions_for_address(
        &self,
        address: &str,
    ) -> RawResponse<Vec<RawTransaction>> {
        self.query(
            "txlist",
            "account",
            "txlist",
            &[
                ("address", address),
                ("startblock", "0"),
                ("endblock", TXLIST_END_BLOCK),
                ("sort", "asc"),
            ],
        )
        .await
    }
}

impl std::fmt::Debug for EtherscanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtherscanClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.retry.max_attempts())
            .finish()
    }
}

/// Interpret a response body from either API dialect.
fn decode_body<T: DeserializeOwned>(body: Value) -> RawResponse<T> {
    let decode_err = |e: serde_json::Error| -> RemoteFailure {
        AdapterError::Decode(format!("Unexpected response shape: {}", e)).into()
    };

    let Some(status) = body.get("status").and_then(Value::as_str).map(str::to_owned) else {
        return serde_json::from_value(body).map_err(decode_err);
    };

    let result = body.get("result").cloned().unwrap_or(Value::Null);

    // "No transactions found" arrives as status 0 with an empty list.
    if status != "1" && !result.is_array() {
        let message = result
            .as_str()
            .or_else(|| body.get("message").and_then(Value::as_str))
            .unwrap_or("NOTOK")
            .to_string();
        return Err(RemoteFailure::Message(message));
    }

    serde_json::from_value(result)
        .map(RemoteResponse::ok)
        .map_err(decode_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> EtherscanClient {
        let config = ExplorerConfig {
            api_key: "KEY".to_string(),
            ..Default::default()
        };
        EtherscanClient::new(
            Url::parse("https://api-ropsten.etherscan.io/api").unwrap(),
            &config,
            RetryPolicy::none(),
        )
    }

    #[test]
    fn test_request_url() {
        let url = client().request_url("account", "txlist", &[("address", "0xabc")]);
        assert_eq!(
            url.as_str(),
            "https://api-ropsten.etherscan.io/api?module=account&action=txlist&address=0xabc&apikey=KEY"
        );
    }

    #[test]
    fn test_debug_omits_api_key() {
        assert!(!format!("{:?}", client()).contains("KEY"));
    }

    #[test]
    fn test_decode_rpc_envelope() {
        let body = json!({"jsonrpc": "2.0", "id": 83, "result": "0x4b7"});
        let resp: RemoteResponse<String> = decode_body(body).unwrap();
        assert_eq!(resp.result.as_deref(), Some("0x4b7"));

        let body = json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32602, "message": "invalid argument"}});
        let resp: RemoteResponse<String> = decode_body(body).unwrap();
        assert_eq!(resp.error.unwrap().code, -32602);
    }

    #[test]
    fn test_decode_account_success() {
        let body = json!({
            "status": "1",
            "message": "OK",
            "result": [{"account": "0xf4d8", "balance": "40891626854930000000000"}]
        });
        let resp: RemoteResponse<Vec<BalanceEntry>> = decode_body(body).unwrap();
        assert_eq!(resp.result.unwrap()[0].balance, "40891626854930000000000");
    }

    #[test]
    fn test_decode_account_failure_is_bare_message() {
        let body = json!({"status": "0", "message": "NOTOK", "result": "Max rate limit reached"});
        let failure = decode_body::<Vec<BalanceEntry>>(body).unwrap_err();
        assert!(matches!(failure, RemoteFailure::Message(ref m) if m == "Max rate limit reached"));
        assert!(failure.is_retryable());
    }

    #[test]
    fn test_decode_no_transactions_found() {
        let body = json!({"status": "0", "message": "No transactions found", "result": []});
        let resp: RemoteResponse<Vec<RawTransaction>> = decode_body(body).unwrap();
        assert!(resp.result.unwrap().is_empty());
    }

    #[test]
    fn test_decode_wrong_shape() {
        let body = json!({"status": "1", "message": "OK", "result": "not a list"});
        let failure = decode_body::<Vec<BalanceEntry>>(body).unwrap_err();
        assert!(matches!(failure, RemoteFailure::Error(AdapterError::Decode(_))));
        assert!(!failure.is_retryable());
    }
}
