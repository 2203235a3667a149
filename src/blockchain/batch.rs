//! Bounded-concurrency batch execution.
//!
//! # Responsibilities
//! - Partition items into consecutive batches of at most `concurrency`
//! - Run the items of one batch concurrently, batches strictly in sequence
//! - Drop failed items without failing the job
//!
//! Batch N+1 is not dispatched until every item of batch N has settled.
//! Results keep the input order; failed items leave no placeholder.

use std::future::Future;

use futures_util::future::join_all;

use crate::blockchain::types::{AdapterError, AdapterResult};
use crate::observability::metrics;

/// A failed item, kept for diagnostics.
#[derive(Debug)]
pub struct BatchFailure {
    /// Position of the item in the input.
    pub index: usize,
    pub error: AdapterError,
}

/// Successful results plus the failures that were dropped from them.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub results: Vec<T>,
    pub failures: Vec<BatchFailure>,
}

impl<T> BatchOutcome<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
            failures: Vec::new(),
        }
    }
}

/// One execution of a worker over a collection of items.
pub struct BatchJob<I, F> {
    items: Vec<I>,
    worker: F,
    /// Maximum items in flight; `None` runs everything as one batch.
    concurrency: Option<usize>,
}

impl<I, F, Fut, T> BatchJob<I, F>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = AdapterResult<T>>,
{
    pub fn new(items: Vec<I>, worker: F) -> Self {
        Self {
            items,
            worker,
            concurrency: None,
        }
    }

    /// Cap the number of items in flight.
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    /// Run the job, returning only the successful results.
    pub async fn run(self) -> AdapterResult<Vec<T>> {
        Ok(self.run_collect().await?.results)
    }

    /// Run the job, returning successes and the dropped failures.
    pub async fn run_collect(self) -> AdapterResult<BatchOutcome<T>> {
        let BatchJob {
            items,
            worker,
            concurrency,
        } = self;

        let batch_size = match concurrency {
            Some(0) => {
                return Err(AdapterError::InvalidArgument(
                    "concurrency limit must be at least 1".to_string(),
                ))
            }
            Some(limit) => limit,
            None => items.len().max(1),
        };

        let total = items.len();
        let mut outcome = BatchOutcome::with_capacity(total);
        let mut pending = items.into_iter().enumerate().peekable();
        let mut batch_index = 0usize;

        while pending.peek().is_some() {
            let batch: Vec<(usize, I)> = pending.by_ref().take(batch_size).collect();
            tracing::debug!(batch = batch_index, size = batch.len(), total, "Dispatching batch");

            let settled = join_all(batch.into_iter().map(|(index, item)| {
                let work = worker(item);
                async move { (index, work.await) }
            }))
            .await;

            for (index, result) in settled {
                match result {
                    Ok(value) => outcome.results.push(value),
                    Err(error) => {
                        tracing::warn!(index, error = %error, "Batch item failed, dropping");
                        outcome.failures.push(BatchFailure { index, error });
                    }
                }
            }
            batch_index += 1;
        }

        metrics::record_batch_items("ok", outcome.results.len());
        metrics::record_batch_items("failed", outcome.failures.len());
        Ok(outcome)
    }
}

/// Map `worker` over `items`, at most `concurrency` at a time.
pub async fn map_limit<I, F, Fut, T>(
    items: Vec<I>,
    worker: F,
    concurrency: Option<usize>,
) -> AdapterResult<Vec<T>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = AdapterResult<T>>,
{
    let job = BatchJob::new(items, worker);
    match concurrency {
        Some(limit) => job.concurrency(limit).run().await,
        None => job.run().await,
    }
}
