//! Service layer for API operations.

use crate::error::ApiError;
use crate::models::SupportedResponse;
use dexpool_domain::identifier::is_transaction_hash;
use dexpool_domain::{ChainConfig, NetworkConfig, PoolRecord, Protocol, ProtocolFamily};
use dexpool_protocols::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// When the `v3` family moves on to its next candidate protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Only a failed attempt falls through; an empty answer is final.
    #[default]
    OnError,
    /// Both failures and empty answers fall through.
    OnErrorOrAbsence,
}

/// How the ambiguous `v3` family picks between deployments sharing an ABI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V3Resolution {
    pub order: Vec<Protocol>,
    pub policy: FallbackPolicy,
}

impl Default for V3Resolution {
    fn default() -> Self {
        Self {
            order: ProtocolFamily::V3.protocols().to_vec(),
            policy: FallbackPolicy::default(),
        }
    }
}

impl V3Resolution {
    #[must_use]
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Dispatches client queries to protocol adapters and transaction lookups.
pub struct PoolQueryService {
    networks: Arc<NetworkConfig>,
    adapters: HashMap<Protocol, Arc<dyn PoolAdapter>>,
    v3: V3Resolution,
    transactions: TransactionService,
}

impl PoolQueryService {
    /// Registers one adapter per protocol over `ctx`.
    pub fn new(ctx: AdapterContext) -> Self {
        let adapters: Vec<Arc<dyn PoolAdapter>> = vec![
            Arc::new(UniswapV2Adapter::new(ctx.clone())),
            Arc::new(V3Adapter::uniswap(ctx.clone())),
            Arc::new(V3Adapter::pancake(ctx.clone())),
            Arc::new(UniswapV4Adapter::new(ctx.clone())),
            Arc::new(PancakeV4ClAdapter::new(ctx.clone())),
            Arc::new(PancakeV4BinAdapter::new(ctx.clone())),
        ];
        Self {
            networks: Arc::clone(&ctx.networks),
            adapters: adapters
                .into_iter()
                .map(|adapter| (adapter.protocol(), adapter))
                .collect(),
            v3: V3Resolution::default(),
            transactions: TransactionService::new(ctx),
        }
    }

    /// Replaces the adapter registered for the adapter's protocol.
    #[must_use]
    pub fn with_adapter(mut self, adapter: Arc<dyn PoolAdapter>) -> Self {
        self.adapters.insert(adapter.protocol(), adapter);
        self
    }

    #[must_use]
    pub fn with_v3_resolution(mut self, v3: V3Resolution) -> Self {
        self.v3 = v3;
        self
    }

    pub fn networks(&self) -> &NetworkConfig {
        &self.networks
    }

    pub fn supported(&self) -> SupportedResponse {
        SupportedResponse::from(self.networks.as_ref())
    }

    /// Queries one pool on one chain.
    pub async fn query_pool(
        &self,
        dex: &str,
        network: &str,
        pool_id: &str,
    ) -> Result<PoolRecord, ApiError> {
        let family = parse_family(dex)?;
        let chain = self.resolve_network(network)?;
        reject_transaction_hash(family, pool_id)?;

        let (order, policy) = self.candidates(family);
        let supported: Vec<Protocol> = order
            .iter()
            .copied()
            .filter(|protocol| chain.supports(*protocol))
            .collect();
        let Some(&first) = order.first() else {
            return Err(ApiError::UnsupportedDex);
        };
        if supported.is_empty() {
            return Err(AdapterError::UnsupportedChain {
                protocol: first.label(),
                chain: chain.key.clone(),
            }
            .into());
        }

        let mut last_error = None;
        for protocol in supported {
            let adapter = self.adapter(protocol)?;
            debug!(chain = %chain.key, protocol = %protocol, pool = pool_id, "Dispatching pool query");
            match adapter.query_pool(pool_id, &chain.key).await {
                Ok(Some(record)) => return Ok(record),
                Ok(None) => {
                    last_error = None;
                    if policy == FallbackPolicy::OnError {
                        break;
                    }
                }
                Err(err) if err.is_client_error() => return Err(err.into()),
                Err(err) => {
                    warn!(chain = %chain.key, protocol = %protocol, error = %err, "Pool query failed");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) => Err(err.into()),
            None => Err(ApiError::NotFound("Pool not found".to_string())),
        }
    }

    /// Searches every chain for a pool.
    pub async fn query_pool_across_chains(
        &self,
        dex: &str,
        pool_id: &str,
    ) -> Result<PoolRecord, ApiError> {
        let family = parse_family(dex)?;
        reject_transaction_hash(family, pool_id)?;

        let (order, policy) = self.candidates(family);
        let mut client_error = None;
        for &protocol in order {
            let adapter = self.adapter(protocol)?;
            match adapter.search_chains(pool_id).await {
                SearchOutcome::Found(record) => {
                    info!(network = %record.network, protocol = %protocol, pool = pool_id, "Pool resolved across chains");
                    return Ok(record);
                }
                SearchOutcome::Absent if policy == FallbackPolicy::OnError => break,
                SearchOutcome::Absent => {}
                SearchOutcome::Failed(failures) => {
                    if failures.iter().all(|f| f.error.is_client_error()) {
                        client_error = failures.into_iter().next().map(|f| f.error);
                    }
                }
            }
        }

        match client_error {
            Some(err) => Err(err.into()),
            None => Err(ApiError::NotFound(
                "Pool not found on any supported network".to_string(),
            )),
        }
    }

    /// Looks up a transaction on one chain.
    pub async fn transaction(
        &self,
        network: &str,
        hash: &str,
    ) -> Result<TransactionDetails, ApiError> {
        let chain = self.resolve_network(network)?;
        self.transactions
            .lookup(&chain.key, hash)
            .await?
            .ok_or_else(|| ApiError::NotFound("Transaction not found".to_string()))
    }

    /// Looks up a transaction on every chain.
    pub async fn transaction_across_chains(
        &self,
        hash: &str,
    ) -> Result<TransactionDetails, ApiError> {
        self.transactions
            .lookup_across_chains(hash)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound("Transaction not found on any supported network".to_string())
            })
    }

    fn resolve_network(&self, network: &str) -> Result<&ChainConfig, ApiError> {
        self.networks
            .chain(network)
            .ok_or_else(|| ApiError::InvalidNetwork {
                available: self.networks.keys().into_iter().map(str::to_string).collect(),
            })
    }

    fn candidates(&self, family: ProtocolFamily) -> (&[Protocol], FallbackPolicy) {
        match family {
            ProtocolFamily::V3 => (&self.v3.order, self.v3.policy),
            other => (other.protocols(), FallbackPolicy::OnError),
        }
    }

    fn adapter(&self, protocol: Protocol) -> Result<&Arc<dyn PoolAdapter>, ApiError> {
        self.adapters
            .get(&protocol)
            .ok_or_else(|| ApiError::Internal(format!("no adapter registered for {protocol}")))
    }
}

fn parse_family(dex: &str) -> Result<ProtocolFamily, ApiError> {
    dex.parse().map_err(|_| ApiError::UnsupportedDex)
}

/// Address-keyed families would otherwise try to read a transaction hash
/// as a pool contract.
fn reject_transaction_hash(family: ProtocolFamily, pool_id: &str) -> Result<(), ApiError> {
    if family.keyed_by_address() && is_transaction_hash(pool_id) {
        return Err(ApiError::TransactionHashAsPoolId {
            provided: pool_id.to_string(),
        });
    }
    Ok(())
}
