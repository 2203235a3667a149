//! Blockchain data access subsystem.
//!
//! # Data Flow
//! ```text
//! network name + ExplorerConfig
//!     → network.rs (descriptor lookup, lazily built explorer client)
//!     → etherscan.rs (HTTP requests with timeouts and retries)
//!     → call.rs (uniform success/error shapes)
//!     → readiness.rs (initial chain height, fetched once)
//!     → batch.rs (bounded fan-out for multi-item lookups)
//!     → normalize.rs (canonical records, height tracking)
//!     → facade.rs (public operations)
//! ```
//!
//! # Security Constraints
//! - API keys and private keys are never logged
//! - Every explorer request has a deadline

pub mod adapter;
pub mod batch;
pub mod call;
pub mod etherscan;
pub mod explorer;
pub mod facade;
pub mod height;
pub mod hex;
pub mod keys;
pub mod network;
pub mod normalize;
pub mod readiness;
pub mod types;

pub use adapter::{create_adapter, create_adapter_with_explorer, Adapter};
pub use explorer::Explorer;
pub use facade::Blockchain;
pub use network::Network;
pub use types::{AdapterError, AdapterResult, ChainId, ChainInfo, TransactionRecord};
