//! Explorer service seam.
//!
//! # Responsibilities
//! - Name the remote calls the adapter consumes
//! - Define the raw response shapes before normalization
//!
//! Implementations return raw outcomes; callers pass them through
//! [`call::exec`](crate::blockchain::call::exec) to get typed results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::blockchain::types::AdapterError;

/// Error object embedded in an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteErrorObject {
    pub code: i64,
    pub message: String,
}

/// Response envelope carrying either a result or an embedded error.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RemoteErrorObject>,
}

impl<T> RemoteResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn err(code: i64, message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(RemoteErrorObject {
                code,
                message: message.into(),
            }),
        }
    }
}

/// A rejected remote call.
#[derive(Debug)]
pub enum RemoteFailure {
    /// Bare message with no structure (rate limit text, HTTP status line).
    Message(String),
    /// Already-typed error, propagated as is.
    Error(AdapterError),
}

impl RemoteFailure {
    /// Transport-level failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteFailure::Message(_) => true,
            RemoteFailure::Error(e) => e.is_retryable(),
        }
    }
}

impl std::fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteFailure::Message(message) => write!(f, "{}", message),
            RemoteFailure::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<AdapterError> for RemoteFailure {
    fn from(err: AdapterError) -> Self {
        RemoteFailure::Error(err)
    }
}

/// Outcome of a raw remote call.
pub type RawResponse<T> = Result<RemoteResponse<T>, RemoteFailure>;

/// Per-address balance entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BalanceEntry {
    #[serde(default)]
    pub account: String,
    /// Balance in wei as a decimal string.
    pub balance: String,
}

/// Transaction as returned by the explorer, before normalization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub hash: String,
    /// Decimal string, `0x` hex string, integer, or null for pending.
    #[serde(default)]
    pub block_number: Option<serde_json::Value>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub contract_address: Option<String>,
}

/// Remote block-explorer API.
///
/// Addresses and hashes are passed with the `0x` marker.
#[async_trait]
pub trait Explorer: Send + Sync {
    /// Latest block number as a `0x` hex string.
    async fn get_block_number(&self) -> RawResponse<String>;

    /// Balances for the given address.
    async fn get_balance(&self, address: &str) -> RawResponse<Vec<BalanceEntry>>;

    /// A single transaction by hash.
    async fn get_transaction_by_hash(&self, hash: &str) -> RawResponse<RawTransaction>;

    /// Transactions sent from or to the given address.
    async fn list_transactions_for_address(&self, address: &str)
        -> RawResponse<Vec<RawTransaction>>;
}
