use crate::error::AdapterError;
use crate::rpc::AdapterContext;
use crate::token::TokenResolver;
use crate::{PoolAdapter, connect, invalid_address, query_error, resolve_chain};
use async_trait::async_trait;
use dexpool_domain::identifier::parse_pool_address;
use dexpool_domain::math::calculate_spot_price;
use dexpool_domain::pool::ConstantProductState;
use dexpool_domain::{DisplayPrice, NetworkConfig, PoolRecord, PoolState, Protocol};
use tracing::{debug, info};

/// Constant-product pairs sharing the Uniswap V2 pair ABI
/// (Uniswap V2 and PancakeSwap V2 factories).
#[derive(Debug, Clone)]
pub struct UniswapV2Adapter {
    ctx: AdapterContext,
}

impl UniswapV2Adapter {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PoolAdapter for UniswapV2Adapter {
    fn protocol(&self) -> Protocol {
        Protocol::UniswapV2
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
        let pair = parse_pool_address(pool_id).ok_or_else(|| invalid_address(protocol, pool_id))?;
        let reader = connect(&self.ctx, protocol, chain)?;

        debug!(chain = %chain.key, pair = %pair, "Querying V2 pair");

        let ((token0, token1), reserves) =
            tokio::try_join!(reader.pair_tokens(pair), reader.pair_reserves(pair))
                .map_err(query_error(protocol))?;

        let (token0, token1) = TokenResolver::new(reader.as_ref(), chain)
            .resolve_pair(token0, token1)
            .await;

        if reserves.reserve0.is_zero() {
            info!(chain = %chain.key, pair = %pair, "Pair has no token0 reserve");
            return Ok(None);
        }
        let price = calculate_spot_price(
            reserves.reserve0,
            reserves.reserve1,
            token0.decimals,
            token1.decimals,
        );

        let state = PoolState::ConstantProduct(ConstantProductState {
            reserve0: reserves.reserve0,
            reserve1: reserves.reserve1,
            block_timestamp_last: reserves.block_timestamp_last,
            price: DisplayPrice::new(price),
        });

        let mut record = PoolRecord::new(chain, protocol, pair.to_string(), token0, token1, state)
            .with_contract("pool", pair);
        if let Some(factory) = chain.deployments.v2_factory() {
            record = record.with_contract("factory", factory);
        }
        Ok(Some(record))
    }
}
