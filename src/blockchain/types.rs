//! Adapter types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export ExplorerConfig from config module to avoid duplication
pub use crate::config::schema::ExplorerConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during adapter operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Malformed caller input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The initial chain height could not be fetched. Retryable.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The explorer answered with a structured error object.
    #[error("Remote API error {code}: {message}")]
    RemoteApi { code: i64, message: String },

    /// The call failed with a bare message (network failure, rate limit, HTTP status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Unknown network identifier at construction time.
    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// Remote call exceeded its deadline.
    #[error("Remote call timed out after {0} seconds")]
    Timeout(u64),

    /// Response payload did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Key generation or address derivation failed.
    #[error("Key error: {0}")]
    Key(String),
}

impl AdapterError {
    /// Whether a retry of the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdapterError::Transport(_) | AdapterError::Timeout(_))
    }
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Current chain state as reported by `info` and `latest_block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub block_height: u64,
}

/// One side of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet {
    /// Hex addresses without the `0x` marker.
    pub addresses: Vec<String>,
}

impl AddressSet {
    pub fn single(address: impl Into<String>) -> Self {
        Self {
            addresses: vec![address.into()],
        }
    }
}

/// Canonical transaction shape returned by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Block containing the transaction, `None` while pending or unparseable.
    pub block_height: Option<u64>,
    /// Transaction hash without the `0x` marker.
    pub tx_id: String,
    /// Blocks mined on top of the containing block, `None` when unknown.
    pub confirmations: Option<u64>,
    pub from: AddressSet,
    pub to: AddressSet,
    /// Call data without the `0x` marker.
    pub data: String,
}
