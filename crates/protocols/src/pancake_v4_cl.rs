use crate::error::AdapterError;
use crate::rpc::AdapterContext;
use crate::token::TokenResolver;
use crate::{PoolAdapter, connect, invalid_pool_id, query_error, resolve_chain};
use async_trait::async_trait;
use dexpool_domain::identifier::parse_pool_id;
use dexpool_domain::math::sqrt_price_x96_to_price;
use dexpool_domain::pool::ConcentratedLiquidityState;
use dexpool_domain::{DisplayPrice, NetworkConfig, PoolRecord, PoolState, Protocol};
use tracing::{debug, info};

/// PancakeSwap V4 concentrated-liquidity pools.
///
/// The CL pool manager answers both the key lookup and the state reads;
/// tick spacing is packed into the key's parameters word.
#[derive(Debug, Clone)]
pub struct PancakeV4ClAdapter {
    ctx: AdapterContext,
}

impl PancakeV4ClAdapter {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PoolAdapter for PancakeV4ClAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::PancakeV4Cl
    }

    fn networks(&self) -> &NetworkConfig {
        &self.ctx.networks
    }

    async fn query_pool(
        &self,
        pool_id: &str,
        chain_key: &str,
    ) -> Result<Option<PoolRecord>, AdapterError> {
        let protocol = self.protocol();
        let chain = resolve_chain(&self.ctx, protocol, chain_key)?;
        let deployment = chain
            .deployments
            .pancake_v4_cl
            .ok_or_else(|| AdapterError::UnsupportedChain {
                protocol: protocol.label(),
                chain: chain.key.clone(),
            })?;
        let id = parse_pool_id(pool_id).ok_or_else(|| invalid_pool_id(protocol, pool_id))?;
        let reader = connect(&self.ctx, protocol, chain)?;
        let manager = deployment.pool_manager;

        debug!(chain = %chain.key, pool_id = %id, "Querying PancakeSwap V4 CL pool");

        let key = reader
            .pancake_pool_key(manager, id)
            .await
            .map_err(query_error(protocol))?;
        if key.is_absent() {
            info!(chain = %chain.key, pool_id = %id, "PancakeSwap V4 CL pool not found");
            return Ok(None);
        }

        let tokens = TokenResolver::new(reader.as_ref(), chain);
        let (state_reads, (token0, token1)) = tokio::join!(
            async {
                tokio::try_join!(
                    reader.pancake_cl_slot0(manager, id),
                    reader.pancake_cl_liquidity(manager, id),
                )
            },
            tokens.resolve_pair(key.currency0, key.currency1),
        );
        let (slot0, liquidity) = state_reads.map_err(query_error(protocol))?;

        let price = sqrt_price_x96_to_price(slot0.sqrt_price_x96, token0.decimals, token1.decimals);
        let state = ConcentratedLiquidityState {
            sqrt_price_x96: slot0.sqrt_price_x96,
            tick: slot0.tick,
            liquidity,
            protocol_fee: slot0.protocol_fee,
            lp_fee: slot0.lp_fee,
            price: DisplayPrice::new(price),
            reserve0: None,
            reserve1: None,
            observation_index: None,
            observation_cardinality: None,
        };

        let record = PoolRecord::new(
            chain,
            protocol,
            id.to_string(),
            token0,
            token1,
            PoolState::ConcentratedLiquidity(state),
        )
        .with_fee(key.fee)
        .with_tick_spacing(key.tick_spacing())
        .with_hooks(key.hooks)
        .with_parameters(key.packed_parameters())
        .with_contract("poolManager", manager)
        .with_contract("quoter", deployment.quoter)
        .with_explorer_contract(chain, manager);

        Ok(Some(record))
    }
}
