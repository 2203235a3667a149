//! Configuration loading from disk and environment.

use std::path::Path;
use std::fs;
use crate::config::schema::AdapterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load configuration without validating it.
///
/// For callers that layer overrides on top and validate the result themselves.
pub fn read_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: AdapterConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    apply_env(&mut config);
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AdapterConfig, ConfigError> {
    let mut config: AdapterConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    apply_env(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Fill the API key from the environment if the file left it empty.
pub fn apply_env(config: &mut AdapterConfig) {
    if config.explorer.api_key.is_empty() {
        if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
            config.explorer.api_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
network = "ropsten"

[explorer]
api_key = "KEY"
max_concurrent_requests = 5

[retries]
enabled = false
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.network, "ropsten");
        assert_eq!(config.explorer.api_key, "KEY");
        assert_eq!(config.explorer.max_concurrent_requests, 5);
        assert!(!config.retries.enabled);
    }

    #[test]
    fn test_read_config_skips_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = \"atlantis\"").unwrap();

        let config = read_config(file.path()).unwrap();
        assert_eq!(config.network, "atlantis");
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/adapter.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("network = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_display() {
        let err = parse_config("network = \"atlantis\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: network: unsupported network 'atlantis'"
        );
    }
}
