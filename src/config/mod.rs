//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + ETHERSCAN_API_KEY
//!     → loader.rs (parse, deserialize, environment fallback)
//!     → validation.rs (semantic checks)
//!     → AdapterConfig (validated, immutable)
//!     → handed to create_adapter()
//! ```
//!
//! All fields have defaults so a config file may name only the network.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AdapterConfig;
pub use schema::ExplorerConfig;
pub use schema::ObservabilityConfig;
pub use schema::RetryConfig;
