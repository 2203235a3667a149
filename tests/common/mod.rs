//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chain_adapter::blockchain::explorer::{
    BalanceEntry, Explorer, RawResponse, RawTransaction, RemoteFailure, RemoteResponse,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const ADDR_FROM: &str = "7d42e5038444fbfa0b9d9d8c15eff1e27dc5bec6";
pub const ADDR_TO: &str = "f4d8e706cfb25c0decbbdd4d2e2cc10c66376a3f";
pub const TX_HASH: &str = "63e3c7a8f40fa1d4a2bd1b1d3cb66ae0d2f6cbdd96b1c2a5ae3cfc3b2d8ef9c3";

/// Raw transaction in the explorer's wire shape.
pub fn raw_tx(hash: &str, block: serde_json::Value, from: &str, to: &str) -> RawTransaction {
    RawTransaction {
        hash: format!("0x{}", hash),
        block_number: Some(block),
        from: format!("0x{}", from),
        to: Some(format!("0x{}", to)),
        input: Some("0x".to_string()),
        contract_address: None,
    }
}

/// Per-method call counters.
#[derive(Default)]
pub struct CallCounts {
    pub block_number: AtomicU32,
    pub balance: AtomicU32,
    pub transaction: AtomicU32,
    pub txlist: AtomicU32,
}

impl CallCounts {
    pub fn total(&self) -> u32 {
        self.block_number.load(Ordering::SeqCst)
            + self.balance.load(Ordering::SeqCst)
            + self.transaction.load(Ordering::SeqCst)
            + self.txlist.load(Ordering::SeqCst)
    }
}

/// In-memory explorer with scripted answers.
#[derive(Default)]
pub struct MockExplorer {
    tip: u64,
    block_number_failures: AtomicU32,
    transactions: HashMap<String, RawTransaction>,
    address_txs: HashMap<String, Vec<RawTransaction>>,
    failing_addresses: Vec<String>,
    balances: HashMap<String, String>,
    delay: Duration,
    pub calls: CallCounts,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl MockExplorer {
    pub fn new(tip: u64) -> Self {
        Self {
            tip,
            ..Default::default()
        }
    }

    pub fn with_transaction(mut self, tx: RawTransaction) -> Self {
        self.transactions.insert(tx.hash.clone(), tx);
        self
    }

    pub fn with_address(mut self, address: &str, txs: Vec<RawTransaction>) -> Self {
        self.address_txs.insert(format!("0x{}", address), txs);
        self
    }

    pub fn with_failing_address(mut self, address: &str) -> Self {
        self.failing_addresses.push(format!("0x{}", address));
        self
    }

    pub fn with_balance(mut self, address: &str, balance: &str) -> Self {
        self.balances.insert(format!("0x{}", address), balance.to_string());
        self
    }

    /// Fail the next `n` block number calls.
    pub fn failing_block_number(self, n: u32) -> Self {
        self.block_number_failures.store(n, Ordering::SeqCst);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Explorer for MockExplorer {
    async fn get_block_number(&self) -> RawResponse<String> {
        self.calls.block_number.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let remaining = self.block_number_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.block_number_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(RemoteFailure::Message("connection reset by peer".to_string()));
        }
        Ok(RemoteResponse::ok(format!("0x{:x}", self.tip)))
    }

    async fn get_balance(&self, address: &str) -> RawResponse<Vec<BalanceEntry>> {
        self.calls.balance.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        let balance = self.balances.get(address).cloned().unwrap_or_else(|| "0".to_string());
        Ok(RemoteResponse::ok(vec![BalanceEntry {
            account: address.to_string(),
            balance,
        }]))
    }

    async fn get_transaction_by_hash(&self, hash: &str) -> RawResponse<RawTransaction> {
        self.calls.transaction.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        match self.transactions.get(hash) {
            Some(tx) => Ok(RemoteResponse::ok(tx.clone())),
            None => Ok(RemoteResponse::err(-32000, "transaction not found")),
        }
    }

    async fn list_transactions_for_address(&self, address: &str) -> RawResponse<Vec<RawTransaction>> {
        self.calls.txlist.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.failing_addresses.iter().any(|a| a == address) {
            return Err(RemoteFailure::Message("Max rate limit reached".to_string()));
        }
        Ok(RemoteResponse::ok(
            self.address_txs.get(address).cloned().unwrap_or_default(),
        ))
    }
}

/// Reply produced by a mock Etherscan handler.
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn account_ok(result: serde_json::Value) -> Self {
        Self::json(json!({"status": "1", "message": "OK", "result": result}))
    }

    pub fn rpc_ok(result: serde_json::Value) -> Self {
        Self::json(json!({"jsonrpc": "2.0", "id": 1, "result": result}))
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Start a programmable Etherscan-like backend on an ephemeral port.
///
/// The handler receives the decoded query parameters of each request.
pub async fn start_mock_etherscan<F>(handler: F) -> SocketAddr
where
    F: Fn(&HashMap<String, String>) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::with_capacity(4096);
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let head = String::from_utf8_lossy(&buf);
                        let target = head.split_whitespace().nth(1).unwrap_or("/");
                        let query = target.split_once('?').map(|(_, q)| q).unwrap_or("");
                        let params: HashMap<String, String> = url::form_urlencoded::parse(query.as_bytes())
                            .into_owned()
                            .collect();

                        let reply = handler(&params);
                        tokio::time::sleep(reply.delay).await;

                        let status_text = match reply.status {
                            200 => "200 OK",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            reply.body.len(),
                            reply.body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
