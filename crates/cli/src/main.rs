//! Command Line Interface for the DEX pool query service.
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dexpool_api::{ApiError, ApiServer, PoolQueryService, ServerConfig};
use dexpool_domain::parameters::{bin_step_from_hex, tick_spacing_from_hex};
use dexpool_domain::{NetworkConfig, ProtocolFamily};
use dexpool_protocols::prelude::{AdapterContext, AlloyConnector};
use dotenv::dotenv;
use prettytable::{Table, row};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dexpool")]
#[command(about = "Normalized DEX pool state across EVM chains", long_about = None)]
struct Cli {
    /// JSON network table replacing the built-in one
    #[arg(long, global = true)]
    networks: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind host (defaults to HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (defaults to PORT or 3333)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query one pool
    Pool {
        /// DEX family (v2, v3, uniswapv4, uniswapv3, pancakev4cl, pancakev4bin, pancakev3)
        dex: String,

        /// Pool contract address or 32-byte pool id
        pool_id: String,

        /// Network key (e.g. BASE); every network is searched when omitted
        #[arg(short, long)]
        network: Option<String>,
    },
    /// Look up a transaction
    Tx {
        /// Transaction hash
        hash: String,

        /// Network key; every network is searched when omitted
        #[arg(short, long)]
        network: Option<String>,
    },
    /// List configured networks and DEX families
    Supported,
    /// Decode a PancakeSwap V4 parameters word
    Decode {
        /// Hex-encoded parameters, with or without 0x
        parameters: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config = config.with_host(host);
            }
            if let Some(port) = port {
                config = config.with_port(port);
            }
            let service = build_service(cli.networks.as_deref())?;
            ApiServer::new(config, service).run().await?;
        }
        Commands::Pool {
            dex,
            pool_id,
            network,
        } => {
            let service = build_service(cli.networks.as_deref())?;
            let record = match network {
                Some(network) => service.query_pool(&dex, &network, &pool_id).await,
                None => service.query_pool_across_chains(&dex, &pool_id).await,
            }
            .map_err(describe)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Tx { hash, network } => {
            let service = build_service(cli.networks.as_deref())?;
            let details = match network {
                Some(network) => service.transaction(&network, &hash).await,
                None => service.transaction_across_chains(&hash).await,
            }
            .map_err(describe)?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        Commands::Supported => {
            let networks = load_networks(cli.networks.as_deref())?;
            let mut table = Table::new();
            table.add_row(row!["Key", "Name", "Chain ID", "Deployments"]);
            for chain in networks.chains() {
                table.add_row(row![
                    chain.key,
                    chain.name,
                    chain.chain_id,
                    chain.deployments.names().join(", ")
                ]);
            }
            table.printstd();
            println!("DEX families: {}", ProtocolFamily::TOKENS.join(", "));
        }
        Commands::Decode { parameters } => {
            println!("Tick spacing: {}", tick_spacing_from_hex(&parameters));
            println!("Bin step:     {}", bin_step_from_hex(&parameters));
        }
    }

    Ok(())
}

fn load_networks(path: Option<&Path>) -> Result<NetworkConfig> {
    let networks = match path {
        Some(path) => NetworkConfig::from_json_file(path)
            .with_context(|| format!("loading network table from {}", path.display()))?,
        None => NetworkConfig::default(),
    };
    let networks = networks.with_env_overrides()?;
    debug!(networks = ?networks.keys(), "Network table loaded");
    Ok(networks)
}

fn build_service(path: Option<&Path>) -> Result<PoolQueryService> {
    let networks = load_networks(path)?;
    let ctx = AdapterContext::new(Arc::new(networks), Arc::new(AlloyConnector));
    Ok(PoolQueryService::new(ctx))
}

fn describe(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::InvalidNetwork { available } => {
            anyhow!("Invalid network; available: {}", available.join(", "))
        }
        ApiError::UnsupportedDex => anyhow!(
            "Unsupported DEX; supported: {}",
            ProtocolFamily::TOKENS.join(", ")
        ),
        ApiError::TransactionHashAsPoolId { provided } => anyhow!(
            "{provided} looks like a transaction hash, not a pool; try `dexpool tx {provided}`"
        ),
        other => anyhow!(other),
    }
}
