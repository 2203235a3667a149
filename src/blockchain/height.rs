//! Tracked chain height.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::observability::metrics;

/// Highest block number observed by one facade instance.
///
/// Only ever raised; concurrent observers resolve through `fetch_max`.
#[derive(Debug, Default)]
pub struct ChainHeight {
    value: AtomicU64,
}

impl ChainHeight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current height, 0 before the first observation.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Raise the height to `height` if higher. Returns the height after the update.
    pub fn observe(&self, height: u64) -> u64 {
        let previous = self.value.fetch_max(height, Ordering::SeqCst);
        if height > previous {
            metrics::record_chain_height(height);
            height
        } else {
            previous
        }
    }
}
