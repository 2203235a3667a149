//! Supported networks and their explorer endpoints.

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use url::Url;

use crate::blockchain::etherscan::EtherscanClient;
use crate::blockchain::types::{AdapterError, AdapterResult, ChainId};
use crate::config::schema::{AdapterConfig, ExplorerConfig, RetryConfig};
use crate::resilience::RetryPolicy;

/// Blockchain family served by this adapter.
pub const BLOCKCHAIN: &str = "ethereum";

/// Curve used for account keys.
pub const CURVE: &str = "secp256k1";

/// Chain-specific constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConstants {
    pub chain_id: ChainId,
}

/// Static description of one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub name: &'static str,
    pub blockchain: &'static str,
    /// Smallest output amount in wei.
    pub min_output_amount: u64,
    pub curve: &'static str,
    pub constants: NetworkConstants,
    /// Default Etherscan endpoint.
    pub explorer_url: &'static str,
}

const fn descriptor(name: &'static str, chain_id: u64, explorer_url: &'static str) -> NetworkDescriptor {
    NetworkDescriptor {
        name,
        blockchain: BLOCKCHAIN,
        min_output_amount: 1,
        curve: CURVE,
        constants: NetworkConstants {
            chain_id: ChainId(chain_id),
        },
        explorer_url,
    }
}

static NETWORKS: [NetworkDescriptor; 6] = [
    descriptor("mainnet", 1, "https://api.etherscan.io/api"),
    descriptor("ropsten", 3, "https://api-ropsten.etherscan.io/api"),
    descriptor("rinkeby", 4, "https://api-rinkeby.etherscan.io/api"),
    descriptor("goerli", 5, "https://api-goerli.etherscan.io/api"),
    descriptor("kovan", 42, "https://api-kovan.etherscan.io/api"),
    descriptor("sepolia", 11155111, "https://api-sepolia.etherscan.io/api"),
];

/// Find a network by name.
pub fn lookup(name: &str) -> Option<&'static NetworkDescriptor> {
    NETWORKS.iter().find(|n| n.name == name)
}

/// Names of all supported networks.
pub fn supported() -> impl Iterator<Item = &'static str> {
    NETWORKS.iter().map(|n| n.name)
}

/// A network bound to explorer credentials.
///
/// The explorer client is built on first use of [`Network::api`] and reused.
pub struct Network {
    descriptor: &'static NetworkDescriptor,
    endpoint: Url,
    explorer: ExplorerConfig,
    retries: RetryConfig,
    api: OnceLock<Arc<EtherscanClient>>,
}

impl Network {
    /// Bind the named network to the given configuration.
    pub fn new(name: &str, config: &AdapterConfig) -> AdapterResult<Self> {
        let descriptor =
            lookup(name).ok_or_else(|| AdapterError::UnsupportedNetwork(name.to_string()))?;

        let raw_url = config
            .explorer
            .base_url
            .as_deref()
            .unwrap_or(descriptor.explorer_url);
        let endpoint = Url::parse(raw_url).map_err(|e| {
            AdapterError::InvalidArgument(format!("Invalid explorer URL '{}': {}", raw_url, e))
        })?;

        Ok(Self {
            descriptor,
            endpoint,
            explorer: config.explorer.clone(),
            retries: config.retries.clone(),
            api: OnceLock::new(),
        })
    }

    pub fn descriptor(&self) -> &'static NetworkDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn chain_id(&self) -> ChainId {
        self.descriptor.constants.chain_id
    }

    /// Explorer client for this network, constructed on first access.
    pub fn api(&self) -> Arc<EtherscanClient> {
        self.api
            .get_or_init(|| {
                tracing::debug!(network = self.name(), endpoint = %self.endpoint, "Creating explorer client");
                Arc::new(EtherscanClient::new(
                    self.endpoint.clone(),
                    &self.explorer,
                    RetryPolicy::from(&self.retries),
                ))
            })
            .clone()
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("name", &self.descriptor.name)
            .field("chain_id", &self.descriptor.constants.chain_id)
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}
