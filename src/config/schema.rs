//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the explorer adapter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Network identifier (e.g., "mainnet", "ropsten").
    pub network: String,

    /// Explorer API settings.
    pub explorer: ExplorerConfig,

    /// Retry configuration for transport failures.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            network: "mainnet".to_string(),
            explorer: ExplorerConfig::default(),
            retries: RetryConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Explorer API configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// API key sent with every request.
    pub api_key: String,

    /// Overrides the network's default explorer endpoint.
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Items in flight per batch for multi-item lookups.
    pub max_concurrent_requests: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout_secs: 10,
            max_concurrent_requests: 3,
        }
    }
}

impl std::fmt::Debug for ExplorerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .finish()
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            base_delay_ms: 250,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
