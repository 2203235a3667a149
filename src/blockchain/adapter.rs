//! Adapter construction.

use std::sync::Arc;

use crate::blockchain::explorer::Explorer;
use crate::blockchain::facade::Blockchain;
use crate::blockchain::network::Network;
use crate::blockchain::types::AdapterResult;
use crate::config::AdapterConfig;

/// A network description paired with its read facade.
#[derive(Debug)]
pub struct Adapter {
    pub network: Network,
    pub blockchain: Blockchain,
}

/// Build an adapter for `network_name` backed by the network's Etherscan endpoint.
///
/// Fails with `UnsupportedNetwork` for unknown names. No remote call is made.
pub fn create_adapter(network_name: &str, config: &AdapterConfig) -> AdapterResult<Adapter> {
    let network = Network::new(network_name, config)?;
    let explorer: Arc<dyn Explorer> = network.api();
    let blockchain = Blockchain::new(explorer)
        .with_max_concurrent_requests(config.explorer.max_concurrent_requests);

    tracing::info!(
        network = network.name(),
        chain_id = network.chain_id().0,
        max_concurrent_requests = config.explorer.max_concurrent_requests,
        "Adapter created"
    );

    Ok(Adapter {
        network,
        blockchain,
    })
}

/// Build an adapter over a caller-supplied explorer.
pub fn create_adapter_with_explorer(
    network_name: &str,
    config: &AdapterConfig,
    explorer: Arc<dyn Explorer>,
) -> AdapterResult<Adapter> {
    let network = Network::new(network_name, config)?;
    let blockchain = Blockchain::new(explorer)
        .with_max_concurrent_requests(config.explorer.max_concurrent_requests);
    Ok(Adapter {
        network,
        blockchain,
    })
}
