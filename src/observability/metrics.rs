//! Metrics collection.
//!
//! # Metrics
//! - `adapter_remote_calls_total` (counter): explorer calls by method, outcome
//! - `adapter_batch_items_total` (counter): batch items by outcome
//! - `adapter_chain_height` (gauge): highest observed block number
//!
//! No recorder is installed here; without one the macros are no-ops.

/// Record one explorer call.
pub fn record_remote_call(method: &'static str, outcome: &'static str) {
    ::metrics::counter!(
        "adapter_remote_calls_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record settled batch items.
pub fn record_batch_items(outcome: &'static str, count: usize) {
    ::metrics::counter!("adapter_batch_items_total", "outcome" => outcome).increment(count as u64);
}

/// Record the tracked chain height.
pub fn record_chain_height(height: u64) {
    ::metrics::gauge!("adapter_chain_height").set(height as f64);
}
