//! One-shot readiness initialization.
//!
//! # State Transitions
//! ```text
//! Uninitialized → Pending: first ensure_ready() starts the height fetch
//! Pending → Ready: fetch succeeds, chain height recorded
//! Pending → Uninitialized: fetch fails, next call retries
//! ```
//!
//! Callers arriving while Pending await the same shared fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::blockchain::height::ChainHeight;
use crate::blockchain::types::{AdapterError, AdapterResult};

/// Produces a fresh chain height fetch.
pub type HeightFetch = Arc<dyn Fn() -> BoxFuture<'static, AdapterResult<u64>> + Send + Sync>;

type SharedFetch = Shared<BoxFuture<'static, Result<u64, String>>>;

/// Observable gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Uninitialized,
    Pending,
    Ready,
}

enum GateState {
    Uninitialized,
    Pending { attempt: u64, fetch: SharedFetch },
    Ready,
}

/// Memoized initializer guarding every height-dependent operation.
pub struct ReadinessGate {
    state: Mutex<GateState>,
    attempts: AtomicU64,
    fetch: HeightFetch,
    height: Arc<ChainHeight>,
}

impl ReadinessGate {
    pub fn new(fetch: HeightFetch, height: Arc<ChainHeight>) -> Self {
        Self {
            state: Mutex::new(GateState::Uninitialized),
            attempts: AtomicU64::new(0),
            fetch,
            height,
        }
    }

    /// Current state of the gate.
    pub fn readiness(&self) -> Readiness {
        match *self.state.lock().expect("readiness mutex poisoned") {
            GateState::Uninitialized => Readiness::Uninitialized,
            GateState::Pending { .. } => Readiness::Pending,
            GateState::Ready => Readiness::Ready,
        }
    }

    /// Resolve once the chain height is known.
    ///
    /// Returns the tracked height. Fails with [`AdapterError::Initialization`]
    /// when the fetch fails; the gate is then uninitialized again.
    pub async fn ensure_ready(&self) -> AdapterResult<u64> {
        let (attempt, fetch) = {
            let mut state = self.state.lock().expect("readiness mutex poisoned");
            let in_flight = match &*state {
                GateState::Ready => return Ok(self.height.get()),
                GateState::Pending { attempt, fetch } => Some((*attempt, fetch.clone())),
                GateState::Uninitialized => None,
            };
            match in_flight {
                Some(pending) => pending,
                None => {
                    let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    tracing::debug!(attempt, "Starting chain height initialization");
                    let fetch = (self.fetch)()
                        .map(|outcome| outcome.map_err(|e| e.to_string()))
                        .boxed()
                        .shared();
                    *state = GateState::Pending {
                        attempt,
                        fetch: fetch.clone(),
                    };
                    (attempt, fetch)
                }
            }
        };

        let outcome = fetch.await;

        let mut state = self.state.lock().expect("readiness mutex poisoned");
        let current = matches!(&*state, GateState::Pending { attempt: a, .. } if *a == attempt);
        match outcome {
            Ok(fetched) => {
                let height = self.height.observe(fetched);
                if current {
                    *state = GateState::Ready;
                    tracing::info!(block_height = height, "Adapter ready");
                }
                Ok(height)
            }
            Err(message) => {
                if current {
                    *state = GateState::Uninitialized;
                    tracing::warn!(attempt, error = %message, "Chain height initialization failed");
                }
                Err(AdapterError::Initialization(message))
            }
        }
    }
}

impl std::fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessGate")
            .field("readiness", &self.readiness())
            .field("height", &self.height.get())
            .finish()
    }
}
