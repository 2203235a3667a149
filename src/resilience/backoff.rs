//! Retry spacing.

use std::time::Duration;

use rand::Rng;

use crate::resilience::RetryPolicy;

/// Delay before retry number `retry` (1-based) under `policy`.
///
/// Doubles from the base delay up to the cap, then adds up to 10% jitter
/// (inclusive). Retry 0 and a zero base delay mean no wait.
pub fn backoff_delay(policy: &RetryPolicy, retry: u32) -> Duration {
    if retry == 0 || policy.base_delay_ms == 0 {
        return Duration::ZERO;
    }

    let factor = 1u64.checked_shl(retry - 1).unwrap_or(u64::MAX);
    let delay_ms = policy
        .base_delay_ms
        .saturating_mul(factor)
        .min(policy.max_delay_ms);
    let jitter_ms = rand::thread_rng().gen_range(0..=delay_ms / 10);

    Duration::from_millis(delay_ms.saturating_add(jitter_ms))
}
