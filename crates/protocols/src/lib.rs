//! Protocol adapters for EVM liquidity pools.
//!
//! This crate turns raw on-chain state into normalized pool records:
//! - Uniswap V2 style constant-product pairs
//! - Uniswap V3 and PancakeSwap V3 concentrated-liquidity pools
//! - Uniswap V4 pools read through the state-view lens
//! - PancakeSwap V4 CL and Bin pools read through their pool managers
//! - Transaction lookups across the configured chains

/// Prelude module for convenient imports.
pub mod prelude;

/// Alloy-backed chain reader.
pub mod alloy_reader;
/// Solidity contract bindings.
pub mod contracts;
/// Error types.
pub mod error;
/// PancakeSwap V4 bin pools.
pub mod pancake_v4_bin;
/// PancakeSwap V4 concentrated-liquidity pools.
pub mod pancake_v4_cl;
/// Chain reader seam.
pub mod rpc;
/// Token metadata resolution.
pub mod token;
/// Transaction lookups.
pub mod transaction;
/// Uniswap V2 style pairs.
pub mod uniswap_v2;
/// Uniswap V4 pools.
pub mod uniswap_v4;
/// Uniswap V3 and PancakeSwap V3 pools.
pub mod v3;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::AdapterError;
use crate::rpc::{AdapterContext, ChainReader};
use async_trait::async_trait;
use dexpool_domain::{ChainConfig, NetworkConfig, PoolRecord, Protocol};
use std::sync::Arc;
use tracing::{debug, warn};

/// One chain's failure during a cross-chain search.
#[derive(Debug, Clone)]
pub struct ChainFailure {
    pub chain: String,
    pub error: AdapterError,
}

/// Result of searching every chain that deploys a protocol.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// The first chain, in configuration order, that knows the pool.
    Found(PoolRecord),
    /// At least one chain answered and none knows the pool.
    Absent,
    /// Every chain that was asked failed.
    Failed(Vec<ChainFailure>),
}

impl SearchOutcome {
    /// Collapses the outcome to the record, if any.
    #[must_use]
    pub fn into_record(self) -> Option<PoolRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::Absent | Self::Failed(_) => None,
        }
    }
}

/// Reads one protocol's pools into normalized records.
#[async_trait]
pub trait PoolAdapter: Send + Sync {
    fn protocol(&self) -> Protocol;

    fn networks(&self) -> &NetworkConfig;

    /// Queries one pool on one chain. `Ok(None)` means the chain does not
    /// know the pool.
    async fn query_pool(
        &self,
        pool_id: &str,
        chain_key: &str,
    ) -> Result<Option<PoolRecord>, AdapterError>;

    /// Tries every chain deploying this protocol, in configuration order,
    /// one at a time, stopping at the first record.
    async fn search_chains(&self, pool_id: &str) -> SearchOutcome {
        let protocol = self.protocol();
        let mut failures = Vec::new();
        let mut answered = false;

        for chain in self.networks().chains_supporting(protocol) {
            match self.query_pool(pool_id, &chain.key).await {
                Ok(Some(record)) => {
                    debug!(chain = %chain.key, protocol = %protocol, pool = pool_id, "Pool found");
                    return SearchOutcome::Found(record);
                }
                Ok(None) => answered = true,
                Err(error) => {
                    warn!(chain = %chain.key, protocol = %protocol, pool = pool_id, error = %error, "Chain query failed");
                    failures.push(ChainFailure {
                        chain: chain.key.clone(),
                        error,
                    });
                }
            }
        }

        if answered || failures.is_empty() {
            SearchOutcome::Absent
        } else {
            SearchOutcome::Failed(failures)
        }
    }

    /// Like [`PoolAdapter::search_chains`], without the failure detail.
    async fn query_pool_across_chains(&self, pool_id: &str) -> Option<PoolRecord> {
        self.search_chains(pool_id).await.into_record()
    }
}

/// Chain lookup and deployment check shared by every adapter.
pub(crate) fn resolve_chain<'a>(
    ctx: &'a AdapterContext,
    protocol: Protocol,
    chain_key: &str,
) -> Result<&'a ChainConfig, AdapterError> {
    let chain = ctx
        .networks
        .chain(chain_key)
        .ok_or_else(|| AdapterError::UnknownChain(chain_key.to_uppercase()))?;
    if !chain.supports(protocol) {
        return Err(AdapterError::UnsupportedChain {
            protocol: protocol.label(),
            chain: chain.key.clone(),
        });
    }
    Ok(chain)
}

/// Builds a reader for `chain`, tagging failures with the protocol.
pub(crate) fn connect(
    ctx: &AdapterContext,
    protocol: Protocol,
    chain: &ChainConfig,
) -> Result<Arc<dyn ChainReader>, AdapterError> {
    ctx.connector
        .connect(chain)
        .map_err(|source| AdapterError::Query {
            protocol: protocol.label(),
            source,
        })
}

/// Wraps a remote-read failure with the protocol label.
pub(crate) fn query_error(protocol: Protocol) -> impl Fn(error::RpcError) -> AdapterError {
    move |source| AdapterError::Query {
        protocol: protocol.label(),
        source,
    }
}

pub(crate) fn invalid_address(protocol: Protocol, value: &str) -> AdapterError {
    AdapterError::InvalidIdentifier {
        protocol: protocol.label(),
        expected: "a 20-byte pool contract address",
        value: value.to_string(),
    }
}

pub(crate) fn invalid_pool_id(protocol: Protocol, value: &str) -> AdapterError {
    AdapterError::InvalidIdentifier {
        protocol: protocol.label(),
        expected: "a 32-byte pool id",
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::ClSlot0;
    use crate::testing::{MockConnector, MockReader, context_with};
    use crate::uniswap_v4::UniswapV4Adapter;
    use alloy::primitives::{Address, B256, U256};
    use dexpool_domain::config::UniswapV4Deployment;
    use dexpool_domain::{Deployments, PoolKey, PoolParameters};

    fn chain(key: &str, with_v4: bool) -> ChainConfig {
        let mut chain = NetworkConfig::default().chains()[0].clone();
        chain.key = key.to_string();
        chain.name = key.to_lowercase();
        chain.deployments = Deployments {
            uniswap_v4: with_v4.then_some(UniswapV4Deployment {
                pool_manager: Address::repeat_byte(0x01),
                quoter: Address::repeat_byte(0x02),
                state_view: Address::repeat_byte(0x03),
                reserve_introspection: false,
            }),
            ..Deployments::default()
        };
        chain
    }

    fn three_chains() -> NetworkConfig {
        NetworkConfig::new(vec![chain("ONE", false), chain("TWO", true), chain("THREE", true)])
            .unwrap()
    }

    fn pool_id() -> B256 {
        B256::repeat_byte(0x5e)
    }

    fn live_reader() -> MockReader {
        MockReader::default().with_uniswap_v4_pool(
            pool_id(),
            PoolKey {
                currency0: Address::ZERO,
                currency1: Address::repeat_byte(0x0a),
                fee: 500,
                parameters: PoolParameters::TickSpacing(10),
                hooks: Some(Address::ZERO),
            },
            ClSlot0 {
                sqrt_price_x96: U256::from(1u64) << 96,
                tick: 0,
                protocol_fee: 0,
                lp_fee: 500,
            },
            1,
        )
    }

    #[tokio::test]
    async fn test_search_stops_at_first_chain_with_pool() {
        let connector = Arc::new(
            MockConnector::default()
                .with_reader("TWO", MockReader::default())
                .with_reader("THREE", live_reader()),
        );
        let adapter = UniswapV4Adapter::new(context_with(three_chains(), Arc::clone(&connector)));

        let record = adapter
            .query_pool_across_chains(&pool_id().to_string())
            .await
            .unwrap();

        assert_eq!(record.network, "three");
        assert_eq!(connector.connected(), vec!["TWO", "THREE"]);
    }

    #[tokio::test]
    async fn test_search_does_not_continue_after_match() {
        let connector = Arc::new(
            MockConnector::default()
                .with_reader("TWO", live_reader())
                .with_reader("THREE", live_reader()),
        );
        let adapter = UniswapV4Adapter::new(context_with(three_chains(), Arc::clone(&connector)));

        let outcome = adapter.search_chains(&pool_id().to_string()).await;

        assert!(matches!(outcome, SearchOutcome::Found(ref record) if record.network == "two"));
        assert_eq!(connector.connected(), vec!["TWO"]);
    }

    #[tokio::test]
    async fn test_search_absent_when_no_chain_has_pool() {
        let connector = MockConnector::default()
            .with_reader("TWO", MockReader::default())
            .with_reader("THREE", MockReader::failing());
        let adapter = UniswapV4Adapter::new(context_with(three_chains(), connector));

        let outcome = adapter.search_chains(&pool_id().to_string()).await;
        assert!(matches!(outcome, SearchOutcome::Absent));
    }

    #[tokio::test]
    async fn test_search_failed_when_every_chain_errors() {
        let connector = MockConnector::default()
            .with_reader("TWO", MockReader::failing())
            .with_reader("THREE", MockReader::failing());
        let adapter = UniswapV4Adapter::new(context_with(three_chains(), connector));

        let outcome = adapter.search_chains(&pool_id().to_string()).await;
        let SearchOutcome::Failed(failures) = outcome else {
            panic!("expected every chain to fail");
        };
        let chains: Vec<_> = failures.iter().map(|f| f.chain.as_str()).collect();
        assert_eq!(chains, vec!["TWO", "THREE"]);
        assert!(
            failures
                .iter()
                .all(|f| f.error.to_string().starts_with("Failed to query Uniswap V4 pool"))
        );

        assert!(adapter.query_pool_across_chains(&pool_id().to_string()).await.is_none());
    }
}
