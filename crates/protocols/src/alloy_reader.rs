//! [`ChainReader`] backed by an alloy HTTP provider.

use crate::contracts::{
    IERC20Metadata, IPancakeBinPoolManager, IPancakeClPoolManager, IPancakeV3Pool,
    IUniswapV2Pair, IUniswapV3Pool, IUniswapV4Quoter, IUniswapV4StateView,
};
use crate::error::RpcError;
use crate::rpc::{
    BinSlot0, ChainConnector, ChainReader, ClSlot0, PairReserves, ReceiptData, TransactionData,
    V3Immutables, V3Slot0,
};
use alloy::consensus::Transaction as ConsensusTransaction;
use alloy::network::{ReceiptResponse, TransactionResponse};
use alloy::primitives::aliases::{I24, U24};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use async_trait::async_trait;
use dexpool_domain::{ChainConfig, PoolKey, PoolParameters, Protocol};
use std::sync::Arc;
use tracing::debug;

/// Connects over HTTP using each chain's configured RPC URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyConnector;

impl ChainConnector for AlloyConnector {
    fn connect(&self, chain: &ChainConfig) -> Result<Arc<dyn ChainReader>, RpcError> {
        let url = chain
            .rpc_endpoint()
            .map_err(|err| RpcError::Endpoint(err.to_string()))?;
        debug!(chain = %chain.key, host = url.host_str().unwrap_or_default(), "Connecting provider");
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Arc::new(AlloyReader::new(provider)))
    }
}

/// Reads contract state through a type-erased provider.
#[derive(Clone)]
pub struct AlloyReader {
    provider: DynProvider,
}

impl AlloyReader {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ChainReader for AlloyReader {
    async fn erc20_symbol(&self, token: Address) -> Result<String, RpcError> {
        IERC20Metadata::new(token, self.provider.clone())
            .symbol()
            .call()
            .await
            .map_err(|e| RpcError::call("symbol()", e))
    }

    async fn erc20_name(&self, token: Address) -> Result<String, RpcError> {
        IERC20Metadata::new(token, self.provider.clone())
            .name()
            .call()
            .await
            .map_err(|e| RpcError::call("name()", e))
    }

    async fn erc20_decimals(&self, token: Address) -> Result<u8, RpcError> {
        IERC20Metadata::new(token, self.provider.clone())
            .decimals()
            .call()
            .await
            .map_err(|e| RpcError::call("decimals()", e))
    }

    async fn pair_tokens(&self, pair: Address) -> Result<(Address, Address), RpcError> {
        let contract = IUniswapV2Pair::new(pair, self.provider.clone());
        tokio::try_join!(
            async {
                contract
                    .token0()
                    .call()
                    .await
                    .map_err(|e| RpcError::call("token0()", e))
            },
            async {
                contract
                    .token1()
                    .call()
                    .await
                    .map_err(|e| RpcError::call("token1()", e))
            },
        )
    }

    async fn pair_reserves(&self, pair: Address) -> Result<PairReserves, RpcError> {
        let reserves = IUniswapV2Pair::new(pair, self.provider.clone())
            .getReserves()
            .call()
            .await
            .map_err(|e| RpcError::call("getReserves()", e))?;
        Ok(PairReserves {
            reserve0: U256::from(reserves.reserve0),
            reserve1: U256::from(reserves.reserve1),
            block_timestamp_last: reserves.blockTimestampLast,
        })
    }

    async fn v3_immutables(&self, pool: Address) -> Result<V3Immutables, RpcError> {
        let contract = IUniswapV3Pool::new(pool, self.provider.clone());
        let (token0, token1, fee, tick_spacing) = tokio::try_join!(
            async {
                contract
                    .token0()
                    .call()
                    .await
                    .map_err(|e| RpcError::call("token0()", e))
            },
            async {
                contract
                    .token1()
                    .call()
                    .await
                    .map_err(|e| RpcError::call("token1()", e))
            },
            async {
                contract
                    .fee()
                    .call()
                    .await
                    .map_err(|e| RpcError::call("fee()", e))
            },
            async {
                contract
                    .tickSpacing()
                    .call()
                    .await
                    .map_err(|e| RpcError::call("tickSpacing()", e))
            },
        )?;
        Ok(V3Immutables {
            token0,
            token1,
            fee: fee.to::<u32>(),
            tick_spacing: tick_spacing.as_i32(),
        })
    }

    async fn v3_slot0(&self, pool: Address, flavor: Protocol) -> Result<V3Slot0, RpcError> {
        if flavor == Protocol::PancakeV3 {
            let slot0 = IPancakeV3Pool::new(pool, self.provider.clone())
                .slot0()
                .call()
                .await
                .map_err(|e| RpcError::call("slot0()", e))?;
            return Ok(V3Slot0 {
                sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
                tick: slot0.tick.as_i32(),
                observation_index: slot0.observationIndex,
                observation_cardinality: slot0.observationCardinality,
                fee_protocol: slot0.feeProtocol,
            });
        }
        let slot0 = IUniswapV3Pool::new(pool, self.provider.clone())
            .slot0()
            .call()
            .await
            .map_err(|e| RpcError::call("slot0()", e))?;
        Ok(V3Slot0 {
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
            observation_index: slot0.observationIndex,
            observation_cardinality: slot0.observationCardinality,
            fee_protocol: u32::from(slot0.feeProtocol),
        })
    }

    async fn v3_liquidity(&self, pool: Address) -> Result<u128, RpcError> {
        IUniswapV3Pool::new(pool, self.provider.clone())
            .liquidity()
            .call()
            .await
            .map_err(|e| RpcError::call("liquidity()", e))
    }

    async fn uniswap_v4_pool_key(
        &self,
        quoter: Address,
        pool_id: B256,
    ) -> Result<PoolKey, RpcError> {
        let key = IUniswapV4Quoter::new(quoter, self.provider.clone())
            .getPoolKey(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("getPoolKey(bytes32)", e))?;
        Ok(PoolKey {
            currency0: key.currency0,
            currency1: key.currency1,
            fee: key.fee.to::<u32>(),
            parameters: PoolParameters::TickSpacing(key.tickSpacing.as_i32()),
            hooks: Some(key.hooks),
        })
    }

    async fn uniswap_v4_slot0(
        &self,
        state_view: Address,
        pool_id: B256,
    ) -> Result<ClSlot0, RpcError> {
        let slot0 = IUniswapV4StateView::new(state_view, self.provider.clone())
            .getSlot0(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("getSlot0(bytes32)", e))?;
        Ok(ClSlot0 {
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
            protocol_fee: slot0.protocolFee.to::<u32>(),
            lp_fee: slot0.lpFee.to::<u32>(),
        })
    }

    async fn uniswap_v4_liquidity(
        &self,
        state_view: Address,
        pool_id: B256,
    ) -> Result<u128, RpcError> {
        IUniswapV4StateView::new(state_view, self.provider.clone())
            .getLiquidity(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("getLiquidity(bytes32)", e))
    }

    async fn uniswap_v4_reserves(
        &self,
        quoter: Address,
        key: &PoolKey,
    ) -> Result<(U256, U256), RpcError> {
        let sol_key = IUniswapV4Quoter::PoolKey {
            currency0: key.currency0,
            currency1: key.currency1,
            fee: U24::saturating_from(key.fee),
            tickSpacing: I24::try_from(key.tick_spacing())
                .map_err(|e| RpcError::call("getUniswapV4PoolReserve", e))?,
            hooks: key.hooks.unwrap_or(Address::ZERO),
        };
        let reserves = IUniswapV4Quoter::new(quoter, self.provider.clone())
            .getUniswapV4PoolReserve(sol_key)
            .call()
            .await
            .map_err(|e| RpcError::call("getUniswapV4PoolReserve", e))?;
        Ok((reserves.reserve0, reserves.reserve1))
    }

    async fn pancake_pool_key(&self, manager: Address, pool_id: B256) -> Result<PoolKey, RpcError> {
        let key = IPancakeClPoolManager::new(manager, self.provider.clone())
            .poolIdToPoolKey(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("poolIdToPoolKey(bytes32)", e))?;
        Ok(PoolKey {
            currency0: key.currency0,
            currency1: key.currency1,
            fee: key.fee.to::<u32>(),
            parameters: PoolParameters::Packed(key.parameters),
            hooks: Some(key.hooks),
        })
    }

    async fn pancake_cl_slot0(&self, manager: Address, pool_id: B256) -> Result<ClSlot0, RpcError> {
        let slot0 = IPancakeClPoolManager::new(manager, self.provider.clone())
            .getSlot0(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("getSlot0(bytes32)", e))?;
        Ok(ClSlot0 {
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick: slot0.tick.as_i32(),
            protocol_fee: slot0.protocolFee.to::<u32>(),
            lp_fee: slot0.lpFee.to::<u32>(),
        })
    }

    async fn pancake_cl_liquidity(&self, manager: Address, pool_id: B256) -> Result<u128, RpcError> {
        IPancakeClPoolManager::new(manager, self.provider.clone())
            .getLiquidity(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("getLiquidity(bytes32)", e))
    }

    async fn pancake_bin_slot0(&self, manager: Address, pool_id: B256) -> Result<BinSlot0, RpcError> {
        let slot0 = IPancakeBinPoolManager::new(manager, self.provider.clone())
            .getSlot0(pool_id)
            .call()
            .await
            .map_err(|e| RpcError::call("getSlot0(bytes32)", e))?;
        Ok(BinSlot0 {
            active_id: slot0.activeId.to::<u32>(),
            protocol_fee: slot0.protocolFee.to::<u32>(),
            lp_fee: slot0.lpFee.to::<u32>(),
        })
    }

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionData>, RpcError> {
        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| RpcError::transport("eth_getTransactionByHash", e))?;
        Ok(tx.map(|tx| TransactionData {
            hash: TransactionResponse::tx_hash(&tx),
            from: TransactionResponse::from(&tx),
            to: ConsensusTransaction::to(&tx),
            value: ConsensusTransaction::value(&tx),
            nonce: ConsensusTransaction::nonce(&tx),
            gas_limit: ConsensusTransaction::gas_limit(&tx),
            gas_price: ConsensusTransaction::gas_price(&tx),
            input: ConsensusTransaction::input(&tx).clone(),
            block_number: TransactionResponse::block_number(&tx),
            block_hash: TransactionResponse::block_hash(&tx),
        }))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptData>, RpcError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| RpcError::transport("eth_getTransactionReceipt", e))?;
        Ok(receipt.map(|receipt| ReceiptData {
            success: ReceiptResponse::status(&receipt),
            gas_used: ReceiptResponse::gas_used(&receipt),
            effective_gas_price: ReceiptResponse::effective_gas_price(&receipt),
            log_count: receipt.inner.logs().len(),
            contract_address: ReceiptResponse::contract_address(&receipt),
        }))
    }
}
