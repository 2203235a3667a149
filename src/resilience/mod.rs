//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Explorer request:
//!     → tokio::time::timeout in the client (every call has a deadline)
//!     → On transport failure: retries.rs (retry with backoff.rs delays)
//!     → Final outcome handed to call::exec for normalization
//! ```

pub mod backoff;
pub mod retries;

pub use retries::RetryPolicy;
