use crate::error::AdapterError;
use crate::rpc::AdapterContext;
use crate::token::TokenResolver;
use crate::{PoolAdapter, connect, invalid_address, query_error, resolve_chain};
use async_trait::async_trait;
use dexpool_domain::identifier::parse_pool_address;
use dexpool_domain::math::sqrt_price_x96_to_price;
use dexpool_domain::pool::ConcentratedLiquidityState;
use dexpool_domain::{DisplayPrice, NetworkConfig, PoolRecord, PoolState, Protocol};
use tracing::debug;

/// Concentrated-liquidity pools with the Uniswap V3 pool ABI.
///
/// Uniswap V3 and PancakeSwap V3 share the ABI apart from the width of
/// `slot0().feeProtocol`, and are looked up under different deployments.
#[derive(Debug, Clone)]
pub struct V3Adapter {
    ctx: AdapterContext,
    flavor: Protocol,
}

impl V3Adapter {
    pub fn uniswap(ctx: AdapterContext) -> Self {
        Self {
            ctx,
            flavor: Protocol::UniswapV3,
        }
    }

    pub fn pancake(ctx: AdapterContext) -> Self {
        Self {
            ctx,
            flavor: Protocol::PancakeV3,
        }
    }
}

#[async_trait]
impl PoolAdapter for V3Adapter {
    fn protocol(&self) -> Protocol {
        self.flavor
    }

    fn networks(&self) -> &NetworkConfig {
        &self.ctx.networks
    }

    async fn query_pool(
        &self,
        pool_id: &str,
        chain_key: &str,
    ) -> Result<Option<PoolRecord>, AdapterError> {
        let protocol = self.flavor;
        let chain = resolve_chain(&self.ctx, protocol, chain_key)?;
        let deployment = chain
            .deployments
            .v3(protocol)
            .copied()
            .ok_or_else(|| AdapterError::UnsupportedChain {
                protocol: protocol.label(),
                chain: chain.key.clone(),
            })?;
        let pool = parse_pool_address(pool_id).ok_or_else(|| invalid_address(protocol, pool_id))?;
        let reader = connect(&self.ctx, protocol, chain)?;

        debug!(chain = %chain.key, protocol = %protocol, pool = %pool, "Querying V3 pool");

        let (immutables, slot0, liquidity) = tokio::try_join!(
            reader.v3_immutables(pool),
            reader.v3_slot0(pool, protocol),
            reader.v3_liquidity(pool),
        )
        .map_err(query_error(protocol))?;

        let (token0, token1) = TokenResolver::new(reader.as_ref(), chain)
            .resolve_pair(immutables.token0, immutables.token1)
            .await;

        let price = sqrt_price_x96_to_price(slot0.sqrt_price_x96, token0.decimals, token1.decimals);
        let state = ConcentratedLiquidityState {
            sqrt_price_x96: slot0.sqrt_price_x96,
            tick: slot0.tick,
            liquidity,
            protocol_fee: slot0.fee_protocol,
            lp_fee: immutables.fee,
            price: DisplayPrice::new(price),
            reserve0: None,
            reserve1: None,
            observation_index: None,
            observation_cardinality: None,
        }
        .with_observations(slot0.observation_index, slot0.observation_cardinality);

        let record = PoolRecord::new(
            chain,
            protocol,
            pool.to_string(),
            token0,
            token1,
            PoolState::ConcentratedLiquidity(state),
        )
        .with_fee(immutables.fee)
        .with_tick_spacing(immutables.tick_spacing)
        .with_contract("pool", pool)
        .with_contract("factory", deployment.factory)
        .with_contract("quoter", deployment.quoter);

        Ok(Some(record))
    }
}
