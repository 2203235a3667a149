//! Command-line front end for the explorer adapter.
//!
//! ```text
//! chain-adapter --network ropsten info
//! chain-adapter tx 0x63e3...ef9c3
//! chain-adapter address-txs f4d8e706cfb25c0decbbdd4d2e2cc10c66376a3f
//! chain-adapter balance f4d8e706cfb25c0decbbdd4d2e2cc10c66376a3f
//! chain-adapter keygen
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use chain_adapter::blockchain::keys::{derive_address, generate_key_pair};
use chain_adapter::blockchain::{create_adapter, network, AdapterError};
use chain_adapter::config::loader::{apply_env, read_config};
use chain_adapter::config::validation::validate_config;
use chain_adapter::config::{AdapterConfig, ConfigError};
use chain_adapter::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "chain-adapter")]
#[command(about = "Query Ethereum chain data through a block explorer", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network name, overrides the configuration
    #[arg(short, long)]
    network: Option<String>,

    /// Explorer API key, overrides the configuration
    #[arg(short = 'k', long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show chain info
    Info,
    /// Show the latest block
    Latest,
    /// Look up transactions by hash
    Tx {
        #[arg(required = true)]
        hashes: Vec<String>,
    },
    /// List transactions for addresses
    AddressTxs {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Show the balance of an address in wei
    Balance { address: String },
    /// List supported networks
    Networks,
    /// Generate a new key pair
    Keygen,
    /// Derive an address from a hex public key
    Derive { public_key: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(&config.observability);

    let output = match cli.command {
        Commands::Networks => {
            let networks: Vec<_> = network::supported().filter_map(network::lookup).collect();
            serde_json::to_value(networks)?
        }
        Commands::Keygen => {
            let pair = generate_key_pair();
            json!({
                "address": pair.address(),
                "publicKey": alloy::primitives::hex::encode(pair.public_key()),
                "privateKey": alloy::primitives::hex::encode(pair.private_key()),
            })
        }
        Commands::Derive { public_key } => {
            let bytes = alloy::primitives::hex::decode(&public_key)
                .map_err(|e| AdapterError::InvalidArgument(format!("Invalid public key hex: {}", e)))?;
            json!({ "address": derive_address(&bytes)? })
        }
        command => query(&config, command).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn query(config: &AdapterConfig, command: Commands) -> Result<Value, Box<dyn std::error::Error>> {
    let adapter = create_adapter(&config.network, config)?;
    let blockchain = &adapter.blockchain;

    let output = match command {
        Commands::Info => serde_json::to_value(blockchain.info().await?)?,
        Commands::Latest => serde_json::to_value(blockchain.latest_block().await?)?,
        Commands::Tx { hashes } => {
            let outcome = blockchain.get_transactions_with_failures(&hashes).await?;
            for failure in &outcome.failures {
                tracing::warn!(hash = %hashes[failure.index], error = %failure.error, "Lookup failed");
            }
            serde_json::to_value(outcome.results)?
        }
        Commands::AddressTxs { addresses } => {
            serde_json::to_value(blockchain.list_address_transactions(&addresses).await?)?
        }
        Commands::Balance { address } => json!({ "balance": blockchain.get_balance(&address).await? }),
        Commands::Networks | Commands::Keygen | Commands::Derive { .. } => Value::Null,
    };

    blockchain.close().await;
    Ok(output)
}

fn resolve_config(cli: &Cli) -> Result<AdapterConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => {
            let mut config = AdapterConfig::default();
            apply_env(&mut config);
            config
        }
    };

    if let Some(network) = &cli.network {
        config.network = network.clone();
    }
    if let Some(api_key) = &cli.api_key {
        config.explorer.api_key = api_key.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
