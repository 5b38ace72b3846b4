//! The seam between adapters and the chain.
//!
//! Adapters never talk to a provider directly: every remote read they need
//! is one method on [`ChainReader`], and a fresh reader is built per request
//! through a [`ChainConnector`].

use crate::error::RpcError;
use alloy::primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;
use dexpool_domain::{ChainConfig, NetworkConfig, PoolKey, Protocol};
use std::sync::Arc;

/// Reserves and last-update timestamp of a V2 pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairReserves {
    pub reserve0: U256,
    pub reserve1: U256,
    pub block_timestamp_last: u32,
}

/// Fields of a V3 pool fixed at deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V3Immutables {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
}

/// V3 `slot0()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V3Slot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub observation_index: u16,
    pub observation_cardinality: u16,
    pub fee_protocol: u32,
}

/// `getSlot0(poolId)` of a V4 concentrated-liquidity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClSlot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub protocol_fee: u32,
    pub lp_fee: u32,
}

/// `getSlot0(poolId)` of a bin pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinSlot0 {
    pub active_id: u32,
    pub protocol_fee: u32,
    pub lp_fee: u32,
}

/// A mined or pending transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionData {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: Option<u128>,
    pub input: Bytes,
    pub block_number: Option<u64>,
    pub block_hash: Option<B256>,
}

/// Receipt of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptData {
    pub success: bool,
    pub gas_used: u64,
    pub effective_gas_price: u128,
    pub log_count: usize,
    pub contract_address: Option<Address>,
}

/// Read-only access to one chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn erc20_symbol(&self, token: Address) -> Result<String, RpcError>;
    async fn erc20_name(&self, token: Address) -> Result<String, RpcError>;
    async fn erc20_decimals(&self, token: Address) -> Result<u8, RpcError>;

    /// `token0()` and `token1()` of a V2 pair.
    async fn pair_tokens(&self, pair: Address) -> Result<(Address, Address), RpcError>;
    async fn pair_reserves(&self, pair: Address) -> Result<PairReserves, RpcError>;

    async fn v3_immutables(&self, pool: Address) -> Result<V3Immutables, RpcError>;
    /// `slot0()`, decoded with the layout of the given V3 flavor.
    async fn v3_slot0(&self, pool: Address, flavor: Protocol) -> Result<V3Slot0, RpcError>;
    async fn v3_liquidity(&self, pool: Address) -> Result<u128, RpcError>;

    /// Uniswap V4 quoter `getPoolKey(poolId)`.
    async fn uniswap_v4_pool_key(&self, quoter: Address, pool_id: B256)
    -> Result<PoolKey, RpcError>;
    /// Uniswap V4 state view `getSlot0(poolId)`.
    async fn uniswap_v4_slot0(&self, state_view: Address, pool_id: B256)
    -> Result<ClSlot0, RpcError>;
    /// Uniswap V4 state view `getLiquidity(poolId)`.
    async fn uniswap_v4_liquidity(&self, state_view: Address, pool_id: B256)
    -> Result<u128, RpcError>;
    /// Quoter `getUniswapV4PoolReserve(key)`, where deployed.
    async fn uniswap_v4_reserves(
        &self,
        quoter: Address,
        key: &PoolKey,
    ) -> Result<(U256, U256), RpcError>;

    /// PancakeSwap V4 pool manager `poolIdToPoolKey(poolId)`; shared by the
    /// CL and Bin managers.
    async fn pancake_pool_key(&self, manager: Address, pool_id: B256)
    -> Result<PoolKey, RpcError>;
    async fn pancake_cl_slot0(&self, manager: Address, pool_id: B256)
    -> Result<ClSlot0, RpcError>;
    async fn pancake_cl_liquidity(&self, manager: Address, pool_id: B256)
    -> Result<u128, RpcError>;
    async fn pancake_bin_slot0(&self, manager: Address, pool_id: B256)
    -> Result<BinSlot0, RpcError>;

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionData>, RpcError>;
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptData>, RpcError>;
}

/// Builds a reader for one chain.
pub trait ChainConnector: Send + Sync {
    fn connect(&self, chain: &ChainConfig) -> Result<Arc<dyn ChainReader>, RpcError>;
}

/// Dependencies shared by every adapter: the network table and the
/// connector used to reach it.
#[derive(Clone)]
pub struct AdapterContext {
    pub networks: Arc<NetworkConfig>,
    pub connector: Arc<dyn ChainConnector>,
}

impl AdapterContext {
    pub fn new(networks: Arc<NetworkConfig>, connector: Arc<dyn ChainConnector>) -> Self {
        Self {
            networks,
            connector,
        }
    }
}

impl std::fmt::Debug for AdapterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterContext")
            .field("networks", &self.networks.keys())
            .finish_non_exhaustive()
    }
}
