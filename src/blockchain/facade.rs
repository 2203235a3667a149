//! Public read surface of the adapter.
//!
//! # Data Flow
//! ```text
//! caller → Blockchain operation
//!     → ReadinessGate::ensure_ready (initial chain height)
//!     → call::exec(explorer call)        (one item)
//!       or batch::BatchJob over items    (many items)
//!     → per item: hex check, 0x marker added, then the explorer call
//!     → TransactionNormalizer (records, height tracking)
//! ```

use std::sync::Arc;

use futures_util::future::FutureExt;

use crate::blockchain::batch::{BatchJob, BatchOutcome};
use crate::blockchain::call::exec;
use crate::blockchain::explorer::Explorer;
use crate::blockchain::height::ChainHeight;
use crate::blockchain::hex::{is_hex, prefix_hex, unhex_int};
use crate::blockchain::normalize::TransactionNormalizer;
use crate::blockchain::readiness::{HeightFetch, Readiness, ReadinessGate};
use crate::blockchain::types::{AdapterError, AdapterResult, ChainInfo, TransactionRecord};

/// Default number of explorer requests in flight per batch.
pub const MAX_CONCURRENT_REQUESTS: usize = 3;

/// Read-only view of one chain through an explorer.
pub struct Blockchain {
    explorer: Arc<dyn Explorer>,
    gate: ReadinessGate,
    normalizer: TransactionNormalizer,
    height: Arc<ChainHeight>,
    max_concurrent_requests: usize,
}

impl Blockchain {
    /// Create a facade over `explorer`. Nothing is fetched until the first call.
    pub fn new(explorer: Arc<dyn Explorer>) -> Self {
        let height = Arc::new(ChainHeight::new());
        let gate = ReadinessGate::new(block_number_fetch(explorer.clone()), height.clone());
        Self {
            explorer,
            gate,
            normalizer: TransactionNormalizer::new(height.clone()),
            height,
            max_concurrent_requests: MAX_CONCURRENT_REQUESTS,
        }
    }

    /// Override the per-batch request limit.
    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit;
        self
    }

    /// Highest block number seen so far, 0 before readiness.
    pub fn chain_height(&self) -> u64 {
        self.height.get()
    }

    pub fn readiness(&self) -> Readiness {
        self.gate.readiness()
    }

    /// Current chain state.
    pub async fn info(&self) -> AdapterResult<ChainInfo> {
        self.gate.ensure_ready().await?;
        self.fetch_latest().await
    }

    /// Latest block on the chain.
    pub async fn latest_block(&self) -> AdapterResult<ChainInfo> {
        self.gate.ensure_ready().await?;
        self.fetch_latest().await
    }

    /// Look up transactions by hash. Hashes that fail to resolve, or are not
    /// hex, are omitted.
    pub async fn get_transactions<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> AdapterResult<Vec<TransactionRecord>> {
        Ok(self.get_transactions_with_failures(hashes).await?.results)
    }

    /// Like [`Blockchain::get_transactions`], also returning the dropped failures.
    pub async fn get_transactions_with_failures<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> AdapterResult<BatchOutcome<TransactionRecord>> {
        let limit = self.batch_limit()?;
        self.gate.ensure_ready().await?;

        BatchJob::new(owned(hashes), |hash| self.fetch_transaction(hash))
            .concurrency(limit)
            .run_collect()
            .await
    }

    /// Transactions involving any of `addresses`, address-major order.
    pub async fn list_address_transactions<S: AsRef<str>>(
        &self,
        addresses: &[S],
    ) -> AdapterResult<Vec<TransactionRecord>> {
        let limit = self.batch_limit()?;
        self.gate.ensure_ready().await?;

        let per_address = BatchJob::new(owned(addresses), |address| self.fetch_address_transactions(address))
            .concurrency(limit)
            .run()
            .await?;

        Ok(per_address.into_iter().flatten().collect())
    }

    /// Balance in wei as a decimal string.
    pub async fn get_balance(&self, address: &str) -> AdapterResult<String> {
        let address = marked_hex("address", address)?;
        self.gate.ensure_ready().await?;

        let entries = exec("balancemulti", self.explorer.get_balance(&address)).await?;
        let entry = entries.into_iter().next().ok_or_else(|| {
            AdapterError::Decode(format!("No balance returned for {}", address))
        })?;

        if entry.balance.is_empty() || !entry.balance.chars().all(|c| c.is_ascii_digit()) {
            return Err(AdapterError::Decode(format!(
                "Balance '{}' is not a decimal number",
                entry.balance
            )));
        }
        Ok(entry.balance)
    }

    /// No resources to release.
    pub async fn close(&self) {}

    async fn fetch_latest(&self) -> AdapterResult<ChainInfo> {
        let fetched = fetch_block_number(self.explorer.as_ref()).await?;
        Ok(ChainInfo {
            block_height: self.height.observe(fetched),
        })
    }

    fn batch_limit(&self) -> AdapterResult<usize> {
        match self.max_concurrent_requests {
            0 => Err(AdapterError::InvalidArgument(
                "max_concurrent_requests must be at least 1".to_string(),
            )),
            limit => Ok(limit),
        }
    }

    async fn fetch_transaction(&self, hash: String) -> AdapterResult<TransactionRecord> {
        let hash = marked_hex("transaction hash", &hash)?;
        let raw = exec(
            "eth_getTransactionByHash",
            self.explorer.get_transaction_by_hash(&hash),
        )
        .await?;
        Ok(self.normalizer.normalize(&raw))
    }

    async fn fetch_address_transactions(
        &self,
        address: String,
    ) -> AdapterResult<Vec<TransactionRecord>> {
        let address = marked_hex("address", &address)?;
        let raw = exec("txlist", self.explorer.list_transactions_for_address(&address)).await?;
        Ok(raw.iter().map(|tx| self.normalizer.normalize(tx)).collect())
    }
}

impl std::fmt::Debug for Blockchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blockchain")
            .field("gate", &self.gate)
            .field("max_concurrent_requests", &self.max_concurrent_requests)
            .finish()
    }
}

async fn fetch_block_number(explorer: &dyn Explorer) -> AdapterResult<u64> {
    let hex_height = exec("eth_blockNumber", explorer.get_block_number()).await?;
    unhex_int(&hex_height)
}

fn block_number_fetch(explorer: Arc<dyn Explorer>) -> HeightFetch {
    Arc::new(move || {
        let explorer = explorer.clone();
        async move { fetch_block_number(explorer.as_ref()).await }.boxed()
    })
}

/// Validate a hex input and add the `0x` marker.
fn marked_hex(kind: &str, value: &str) -> AdapterResult<String> {
    if is_hex(value) {
        Ok(prefix_hex(value))
    } else {
        Err(AdapterError::InvalidArgument(format!(
            "expected hex {}, got '{}'",
            kind, value
        )))
    }
}

fn owned<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_owned()).collect()
}
