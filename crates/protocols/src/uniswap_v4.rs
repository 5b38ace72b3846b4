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

/// Uniswap V4 pools, keyed by 32-byte pool id.
///
/// The pool key comes from the quoter, state from the state-view lens.
/// Deployments flagged with reserve introspection also report reserves.
#[derive(Debug, Clone)]
pub struct UniswapV4Adapter {
    ctx: AdapterContext,
}

impl UniswapV4Adapter {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PoolAdapter for UniswapV4Adapter {
    fn protocol(&self) -> Protocol {
        Protocol::UniswapV4
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
            .uniswap_v4
            .ok_or_else(|| AdapterError::UnsupportedChain {
                protocol: protocol.label(),
                chain: chain.key.clone(),
            })?;
        let id = parse_pool_id(pool_id).ok_or_else(|| invalid_pool_id(protocol, pool_id))?;
        let reader = connect(&self.ctx, protocol, chain)?;

        debug!(chain = %chain.key, pool_id = %id, "Querying Uniswap V4 pool");

        let key = reader
            .uniswap_v4_pool_key(deployment.quoter, id)
            .await
            .map_err(query_error(protocol))?;
        if key.is_absent() {
            info!(chain = %chain.key, pool_id = %id, "Uniswap V4 pool not initialized");
            return Ok(None);
        }

        let tokens = TokenResolver::new(reader.as_ref(), chain);
        let state_reads = async {
            tokio::try_join!(
                reader.uniswap_v4_slot0(deployment.state_view, id),
                reader.uniswap_v4_liquidity(deployment.state_view, id),
                async {
                    if deployment.reserve_introspection {
                        reader
                            .uniswap_v4_reserves(deployment.quoter, &key)
                            .await
                            .map(Some)
                    } else {
                        Ok(None)
                    }
                },
            )
        };
        let (state_reads, (token0, token1)) =
            tokio::join!(state_reads, tokens.resolve_pair(key.currency0, key.currency1));
        let (slot0, liquidity, reserves) = state_reads.map_err(query_error(protocol))?;

        let price = sqrt_price_x96_to_price(slot0.sqrt_price_x96, token0.decimals, token1.decimals);
        let mut state = ConcentratedLiquidityState {
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
        if let Some((reserve0, reserve1)) = reserves {
            state = state.with_reserves(reserve0, reserve1);
        }

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
        .with_contract("poolManager", deployment.pool_manager)
        .with_contract("quoter", deployment.quoter)
        .with_contract("stateView", deployment.state_view)
        .with_explorer_contract(chain, deployment.pool_manager);

        Ok(Some(record))
    }
}
