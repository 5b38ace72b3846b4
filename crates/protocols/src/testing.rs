//! Scripted chain readers for adapter tests.

use crate::error::RpcError;
use crate::rpc::{
    AdapterContext, BinSlot0, ChainConnector, ChainReader, ClSlot0, PairReserves, ReceiptData,
    TransactionData, V3Immutables, V3Slot0,
};
use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use dexpool_domain::{ChainConfig, NetworkConfig, PoolKey, PoolParameters, Protocol};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory chain. Unknown contracts revert, unknown V4 pool ids return
/// the all-zero key, and a failing reader errors on every call.
#[derive(Default)]
pub struct MockReader {
    tokens: HashMap<Address, (String, String, u8)>,
    pairs: HashMap<Address, ((Address, Address), PairReserves)>,
    v3_pools: HashMap<Address, (V3Immutables, V3Slot0, u128)>,
    uniswap_v4: HashMap<B256, (PoolKey, ClSlot0, u128)>,
    uniswap_v4_reserves: Option<(U256, U256)>,
    pancake_keys: HashMap<B256, PoolKey>,
    pancake_cl: HashMap<B256, (ClSlot0, u128)>,
    pancake_bin: HashMap<B256, BinSlot0>,
    transactions: HashMap<B256, (TransactionData, Option<ReceiptData>)>,
    failing: bool,
    calls: AtomicUsize,
}

impl MockReader {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: Address, symbol: &str, name: &str, decimals: u8) -> Self {
        self.tokens
            .insert(token, (symbol.to_string(), name.to_string(), decimals));
        self
    }

    pub fn with_pair(
        mut self,
        pair: Address,
        token0: Address,
        token1: Address,
        reserves: PairReserves,
    ) -> Self {
        self.pairs.insert(pair, ((token0, token1), reserves));
        self
    }

    pub fn with_v3_pool(
        mut self,
        pool: Address,
        immutables: V3Immutables,
        slot0: V3Slot0,
        liquidity: u128,
    ) -> Self {
        self.v3_pools.insert(pool, (immutables, slot0, liquidity));
        self
    }

    pub fn with_uniswap_v4_pool(
        mut self,
        id: B256,
        key: PoolKey,
        slot0: ClSlot0,
        liquidity: u128,
    ) -> Self {
        self.uniswap_v4.insert(id, (key, slot0, liquidity));
        self
    }

    pub fn with_uniswap_v4_reserves(mut self, reserve0: U256, reserve1: U256) -> Self {
        self.uniswap_v4_reserves = Some((reserve0, reserve1));
        self
    }

    pub fn with_pancake_key(mut self, id: B256, key: PoolKey) -> Self {
        self.pancake_keys.insert(id, key);
        self
    }

    pub fn with_pancake_cl_state(mut self, id: B256, slot0: ClSlot0, liquidity: u128) -> Self {
        self.pancake_cl.insert(id, (slot0, liquidity));
        self
    }

    pub fn with_pancake_bin_state(mut self, id: B256, slot0: BinSlot0) -> Self {
        self.pancake_bin.insert(id, slot0);
        self
    }

    pub fn with_transaction(mut self, tx: TransactionData, receipt: Option<ReceiptData>) -> Self {
        self.transactions.insert(tx.hash, (tx, receipt));
        self
    }

    /// Number of remote reads served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, call: &'static str) -> Result<(), RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            Err(RpcError::transport(call, "connection refused"))
        } else {
            Ok(())
        }
    }
}

fn reverted(call: &'static str) -> RpcError {
    RpcError::call(call, "execution reverted")
}

fn sentinel_key() -> PoolKey {
    PoolKey {
        currency0: Address::ZERO,
        currency1: Address::ZERO,
        fee: 0,
        parameters: PoolParameters::Packed(B256::ZERO),
        hooks: Some(Address::ZERO),
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn erc20_symbol(&self, token: Address) -> Result<String, RpcError> {
        self.enter("symbol()")?;
        self.tokens
            .get(&token)
            .map(|(symbol, _, _)| symbol.clone())
            .ok_or_else(|| reverted("symbol()"))
    }

    async fn erc20_name(&self, token: Address) -> Result<String, RpcError> {
        self.enter("name()")?;
        self.tokens
            .get(&token)
            .map(|(_, name, _)| name.clone())
            .ok_or_else(|| reverted("name()"))
    }

    async fn erc20_decimals(&self, token: Address) -> Result<u8, RpcError> {
        self.enter("decimals()")?;
        self.tokens
            .get(&token)
            .map(|(_, _, decimals)| *decimals)
            .ok_or_else(|| reverted("decimals()"))
    }

    async fn pair_tokens(&self, pair: Address) -> Result<(Address, Address), RpcError> {
        self.enter("token0()")?;
        self.pairs
            .get(&pair)
            .map(|(tokens, _)| *tokens)
            .ok_or_else(|| reverted("token0()"))
    }

    async fn pair_reserves(&self, pair: Address) -> Result<PairReserves, RpcError> {
        self.enter("getReserves()")?;
        self.pairs
            .get(&pair)
            .map(|(_, reserves)| *reserves)
            .ok_or_else(|| reverted("getReserves()"))
    }

    async fn v3_immutables(&self, pool: Address) -> Result<V3Immutables, RpcError> {
        self.enter("fee()")?;
        self.v3_pools
            .get(&pool)
            .map(|(immutables, _, _)| *immutables)
            .ok_or_else(|| reverted("fee()"))
    }

    async fn v3_slot0(&self, pool: Address, _flavor: Protocol) -> Result<V3Slot0, RpcError> {
        self.enter("slot0()")?;
        self.v3_pools
            .get(&pool)
            .map(|(_, slot0, _)| *slot0)
            .ok_or_else(|| reverted("slot0()"))
    }

    async fn v3_liquidity(&self, pool: Address) -> Result<u128, RpcError> {
        self.enter("liquidity()")?;
        self.v3_pools
            .get(&pool)
            .map(|(_, _, liquidity)| *liquidity)
            .ok_or_else(|| reverted("liquidity()"))
    }

    async fn uniswap_v4_pool_key(&self, _quoter: Address, pool_id: B256) -> Result<PoolKey, RpcError> {
        self.enter("getPoolKey(bytes32)")?;
        Ok(self
            .uniswap_v4
            .get(&pool_id)
            .map(|(key, _, _)| key.clone())
            .unwrap_or_else(sentinel_key))
    }

    async fn uniswap_v4_slot0(&self, _state_view: Address, pool_id: B256) -> Result<ClSlot0, RpcError> {
        self.enter("getSlot0(bytes32)")?;
        self.uniswap_v4
            .get(&pool_id)
            .map(|(_, slot0, _)| *slot0)
            .ok_or_else(|| reverted("getSlot0(bytes32)"))
    }

    async fn uniswap_v4_liquidity(&self, _state_view: Address, pool_id: B256) -> Result<u128, RpcError> {
        self.enter("getLiquidity(bytes32)")?;
        self.uniswap_v4
            .get(&pool_id)
            .map(|(_, _, liquidity)| *liquidity)
            .ok_or_else(|| reverted("getLiquidity(bytes32)"))
    }

    async fn uniswap_v4_reserves(&self, _quoter: Address, _key: &PoolKey) -> Result<(U256, U256), RpcError> {
        self.enter("getUniswapV4PoolReserve")?;
        self.uniswap_v4_reserves
            .ok_or_else(|| reverted("getUniswapV4PoolReserve"))
    }

    async fn pancake_pool_key(&self, _manager: Address, pool_id: B256) -> Result<PoolKey, RpcError> {
        self.enter("poolIdToPoolKey(bytes32)")?;
        Ok(self
            .pancake_keys
            .get(&pool_id)
            .cloned()
            .unwrap_or_else(sentinel_key))
    }

    async fn pancake_cl_slot0(&self, _manager: Address, pool_id: B256) -> Result<ClSlot0, RpcError> {
        self.enter("getSlot0(bytes32)")?;
        self.pancake_cl
            .get(&pool_id)
            .map(|(slot0, _)| *slot0)
            .ok_or_else(|| reverted("getSlot0(bytes32)"))
    }

    async fn pancake_cl_liquidity(&self, _manager: Address, pool_id: B256) -> Result<u128, RpcError> {
        self.enter("getLiquidity(bytes32)")?;
        self.pancake_cl
            .get(&pool_id)
            .map(|(_, liquidity)| *liquidity)
            .ok_or_else(|| reverted("getLiquidity(bytes32)"))
    }

    async fn pancake_bin_slot0(&self, _manager: Address, pool_id: B256) -> Result<BinSlot0, RpcError> {
        self.enter("getSlot0(bytes32)")?;
        self.pancake_bin
            .get(&pool_id)
            .copied()
            .ok_or_else(|| reverted("getSlot0(bytes32)"))
    }

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionData>, RpcError> {
        self.enter("eth_getTransactionByHash")?;
        Ok(self.transactions.get(&hash).map(|(tx, _)| tx.clone()))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptData>, RpcError> {
        self.enter("eth_getTransactionReceipt")?;
        Ok(self
            .transactions
            .get(&hash)
            .and_then(|(_, receipt)| receipt.clone()))
    }
}

/// Hands out pre-scripted readers per chain key and records every
/// connection in order. Chains without a reader fail to connect.
#[derive(Default)]
pub struct MockConnector {
    readers: HashMap<String, Arc<MockReader>>,
    connected: Mutex<Vec<String>>,
}

impl MockConnector {
    pub fn with_reader(mut self, chain_key: &str, reader: MockReader) -> Self {
        self.readers
            .insert(chain_key.to_uppercase(), Arc::new(reader));
        self
    }

    /// Chain keys connected to so far, in order.
    pub fn connected(&self) -> Vec<String> {
        self.connected
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default()
    }
}

impl ChainConnector for MockConnector {
    fn connect(&self, chain: &ChainConfig) -> Result<Arc<dyn ChainReader>, RpcError> {
        if let Ok(mut keys) = self.connected.lock() {
            keys.push(chain.key.clone());
        }
        self.readers
            .get(&chain.key)
            .map(|reader| Arc::clone(reader) as Arc<dyn ChainReader>)
            .ok_or_else(|| RpcError::Endpoint(format!("no reader scripted for {}", chain.key)))
    }
}

/// Adapter context over the built-in network table.
pub fn context(connector: impl Into<Arc<MockConnector>>) -> AdapterContext {
    context_with(NetworkConfig::default(), connector)
}

/// Adapter context over a custom network table.
pub fn context_with(
    networks: NetworkConfig,
    connector: impl Into<Arc<MockConnector>>,
) -> AdapterContext {
    let connector: Arc<MockConnector> = connector.into();
    AdapterContext::new(Arc::new(networks), connector)
}
