//! Ethereum block-explorer adapter library.
//!
//! Exposes block height, transaction, address history and balance queries
//! for a named network, backed by an Etherscan-compatible API.

pub mod blockchain;
pub mod config;
pub mod observability;
pub mod resilience;

pub use blockchain::{create_adapter, Adapter, AdapterError, AdapterResult, Blockchain};
pub use config::AdapterConfig;
