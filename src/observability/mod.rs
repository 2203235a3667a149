//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config)
//!     → whatever metrics recorder the host process installs
//! ```

pub mod logging;
pub mod metrics;
