//! Raw explorer transactions → canonical records.

use std::sync::Arc;

use serde_json::Value;

use crate::blockchain::explorer::RawTransaction;
use crate::blockchain::height::ChainHeight;
use crate::blockchain::hex::{unhex_int, unprefix_hex, HEX_MARKER};
use crate::blockchain::types::{AddressSet, TransactionRecord};

/// Shapes transaction records and advances the tracked chain height.
#[derive(Debug, Clone)]
pub struct TransactionNormalizer {
    height: Arc<ChainHeight>,
}

impl TransactionNormalizer {
    pub fn new(height: Arc<ChainHeight>) -> Self {
        Self { height }
    }

    /// Convert a raw record. Never fails.
    ///
    /// A readable block number raises the chain height first; confirmations
    /// are then measured against the raised height.
    pub fn normalize(&self, raw: &RawTransaction) -> TransactionRecord {
        let block_height = raw.block_number.as_ref().and_then(parse_block_number);

        let confirmations = match block_height {
            Some(block) => {
                let tip = self.height.observe(block);
                Some(tip.saturating_sub(block))
            }
            None => {
                tracing::warn!(
                    tx_id = %raw.hash,
                    block_number = ?raw.block_number,
                    "Unreadable block number, confirmations unknown"
                );
                None
            }
        };

        TransactionRecord {
            block_height,
            tx_id: unprefix_hex(&raw.hash).to_string(),
            confirmations,
            from: AddressSet::single(unprefix_hex(&raw.from)),
            to: recipient(raw),
            data: raw
                .input
                .as_deref()
                .map(unprefix_hex)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Block number as a JSON integer, decimal string, or `0x` hex string.
pub fn parse_block_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if s.starts_with(HEX_MARKER) => unhex_int(s).ok(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn recipient(raw: &RawTransaction) -> AddressSet {
    let to = raw
        .to
        .as_deref()
        .filter(|a| !a.is_empty())
        .or_else(|| raw.contract_address.as_deref().filter(|a| !a.is_empty()));
    match to {
        Some(address) => AddressSet::single(unprefix_hex(address)),
        None => AddressSet::default(),
    }
}
