use crate::error::AdapterError;
use crate::rpc::AdapterContext;
use crate::token::TokenResolver;
use crate::{PoolAdapter, connect, invalid_pool_id, query_error, resolve_chain};
use async_trait::async_trait;
use dexpool_domain::identifier::parse_pool_id;
use dexpool_domain::math::calculate_bin_price;
use dexpool_domain::parameters::DEFAULT_BIN_STEP;
use dexpool_domain::pool::BinLiquidityState;
use dexpool_domain::{DisplayPrice, NetworkConfig, PoolRecord, PoolState, Protocol};
use tracing::{debug, info};

/// PancakeSwap V4 bin pools (liquidity book).
///
/// The bin step lives in bits 16..32 of the key's parameters word and is
/// also reported as the pool's tick spacing.
#[derive(Debug, Clone)]
pub struct PancakeV4BinAdapter {
    ctx: AdapterContext,
}

impl PancakeV4BinAdapter {
    pub fn new(ctx: AdapterContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl PoolAdapter for PancakeV4BinAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::PancakeV4Bin
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
            .pancake_v4_bin
            .ok_or_else(|| AdapterError::UnsupportedChain {
                protocol: protocol.label(),
                chain: chain.key.clone(),
            })?;
        let id = parse_pool_id(pool_id).ok_or_else(|| invalid_pool_id(protocol, pool_id))?;
        let reader = connect(&self.ctx, protocol, chain)?;
        let manager = deployment.pool_manager;

        debug!(chain = %chain.key, pool_id = %id, "Querying PancakeSwap V4 Bin pool");

        let key = reader
            .pancake_pool_key(manager, id)
            .await
            .map_err(query_error(protocol))?;
        if key.is_absent() {
            info!(chain = %chain.key, pool_id = %id, "PancakeSwap V4 Bin pool not found");
            return Ok(None);
        }

        let tokens = TokenResolver::new(reader.as_ref(), chain);
        let (slot0, (token0, token1)) = tokio::join!(
            reader.pancake_bin_slot0(manager, id),
            tokens.resolve_pair(key.currency0, key.currency1),
        );
        let slot0 = slot0.map_err(query_error(protocol))?;

        let bin_step = key.bin_step().unwrap_or(DEFAULT_BIN_STEP);
        let price = calculate_bin_price(slot0.active_id, bin_step);
        let state = BinLiquidityState {
            active_id: slot0.active_id,
            protocol_fee: slot0.protocol_fee,
            lp_fee: slot0.lp_fee,
            price: DisplayPrice::new(price),
        };

        let record = PoolRecord::new(
            chain,
            protocol,
            id.to_string(),
            token0,
            token1,
            PoolState::BinLiquidity(state),
        )
        .with_fee(key.fee)
        .with_bin_step(bin_step)
        .with_tick_spacing(i32::from(bin_step))
        .with_hooks(key.hooks)
        .with_parameters(key.packed_parameters())
        .with_contract("poolManager", manager)
        .with_contract("quoter", deployment.quoter)
        .with_explorer_contract(chain, manager);

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::BinSlot0;
    use crate::testing::{MockConnector, MockReader, context};
    use alloy::primitives::{Address, B256};
    use dexpool_domain::math::CENTER_BIN_ID;
    use dexpool_domain::{PoolKey, PoolModel, PoolParameters};

    fn pool_id() -> B256 {
        B256::repeat_byte(0xef)
    }

    fn reader(active_id: u32) -> MockReader {
        let mut word = [0u8; 32];
        // bin step 25 at bits 16..32
        word[29] = 25;
        MockReader::default()
            .with_pancake_key(
                pool_id(),
                PoolKey {
                    currency0: Address::ZERO,
                    currency1: Address::repeat_byte(0x05),
                    fee: 100,
                    parameters: PoolParameters::Packed(B256::from(word)),
                    hooks: Some(Address::ZERO),
                },
            )
            .with_pancake_bin_state(
                pool_id(),
                BinSlot0 {
                    active_id,
                    protocol_fee: 0,
                    lp_fee: 100,
                },
            )
    }

    #[tokio::test]
    async fn test_center_bin_prices_at_one() {
        let adapter = PancakeV4BinAdapter::new(context(
            MockConnector::default().with_reader("BSC", reader(CENTER_BIN_ID)),
        ));

        let record = adapter
            .query_pool(&pool_id().to_string(), "BSC")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.dex, "PancakeSwap V4 Bin");
        assert_eq!(record.pool_model, PoolModel::BinLiquidity);
        assert_eq!(record.bin_step, Some(25));
        assert_eq!(record.tick_spacing, Some(25));
        assert_eq!(record.state.price().price, 1.0);
        assert_eq!(record.token0.symbol, "BNB");
        // unreadable ERC20 metadata degrades instead of failing
        assert_eq!(record.token1.symbol, "Unknown");
    }

    #[tokio::test]
    async fn test_active_bin_above_center() {
        let adapter = PancakeV4BinAdapter::new(context(
            MockConnector::default().with_reader("BASE", reader(CENTER_BIN_ID + 2)),
        ));

        let record = adapter
            .query_pool(&pool_id().to_string(), "BASE")
            .await
            .unwrap()
            .unwrap();
        let expected = 1.0025f64 * 1.0025;
        assert!((record.state.price().price - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_sentinel_key_is_absent() {
        let adapter = PancakeV4BinAdapter::new(context(
            MockConnector::default().with_reader("BSC", MockReader::default()),
        ));
        let record = adapter
            .query_pool(&pool_id().to_string(), "BSC")
            .await
            .unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_on_ethereum() {
        let adapter = PancakeV4BinAdapter::new(context(MockConnector::default()));
        let err = adapter
            .query_pool(&pool_id().to_string(), "ETH")
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedChain { .. }));
    }
}
