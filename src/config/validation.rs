//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, concurrency > 0)
//! - Check the network is one the adapter supports
//!
//! Returns all validation errors, not just the first.

use crate::blockchain::network;
use crate::config::schema::AdapterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &AdapterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if network::lookup(&config.network).is_none() {
        errors.push(ValidationError::new(
            "network",
            format!("unsupported network '{}'", config.network),
        ));
    }

    if config.explorer.timeout_secs == 0 {
        errors.push(ValidationError::new("explorer.timeout_secs", "must be greater than 0"));
    }

    if config.explorer.max_concurrent_requests == 0 {
        errors.push(ValidationError::new(
            "explorer.max_concurrent_requests",
            "must be greater than 0",
        ));
    }

    if let Some(base_url) = &config.explorer.base_url {
        if let Err(e) = url::Url::parse(base_url) {
            errors.push(ValidationError::new(
                "explorer.base_url",
                format!("invalid URL '{}': {}", base_url, e),
            ));
        }
    }

    if config.retries.enabled {
        if config.retries.max_attempts == 0 {
            errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
        }
        if config.retries.base_delay_ms > config.retries.max_delay_ms {
            errors.push(ValidationError::new(
                "retries.base_delay_ms",
                "must not exceed retries.max_delay_ms",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
