use crate::config::ChainConfig;
use crate::enums::{PoolModel, Protocol};
use crate::fees::Fee;
use crate::parameters;
use crate::price::DisplayPrice;
use crate::serde_util::{option_u256_decimal, u128_decimal, u256_decimal};
use crate::token::TokenInfo;
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a V4-style pool key carries its spacing information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolParameters {
    /// Explicit tick spacing (Uniswap V4).
    TickSpacing(i32),
    /// Opaque packed word (PancakeSwap V4 CL and Bin).
    Packed(B256),
}

/// Identity of a manager-held pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolKey {
    pub currency0: Address,
    pub currency1: Address,
    pub fee: u32,
    pub parameters: PoolParameters,
    pub hooks: Option<Address>,
}

impl PoolKey {
    /// Managers return an all-zero key for unknown pool ids.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.currency0 == Address::ZERO && self.currency1 == Address::ZERO
    }

    /// Tick spacing, decoded from the packed word when needed.
    #[must_use]
    pub fn tick_spacing(&self) -> i32 {
        match &self.parameters {
            PoolParameters::TickSpacing(spacing) => *spacing,
            PoolParameters::Packed(word) => parameters::tick_spacing_from_word(word),
        }
    }

    /// Bin step of a packed word; explicit tick spacings carry none.
    #[must_use]
    pub fn bin_step(&self) -> Option<u16> {
        match &self.parameters {
            PoolParameters::TickSpacing(_) => None,
            PoolParameters::Packed(word) => Some(parameters::bin_step_from_word(word)),
        }
    }

    /// Raw parameters word, if the key carries one.
    #[must_use]
    pub fn packed_parameters(&self) -> Option<B256> {
        match self.parameters {
            PoolParameters::TickSpacing(_) => None,
            PoolParameters::Packed(word) => Some(word),
        }
    }
}

/// Reserve-based state of a constant-product pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantProductState {
    #[serde(with = "u256_decimal")]
    pub reserve0: U256,
    #[serde(with = "u256_decimal")]
    pub reserve1: U256,
    pub block_timestamp_last: u32,
    #[serde(flatten)]
    pub price: DisplayPrice,
}

/// Square-root price state of a concentrated-liquidity pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentratedLiquidityState {
    #[serde(with = "u256_decimal")]
    pub sqrt_price_x96: U256,
    pub tick: i32,
    #[serde(with = "u128_decimal")]
    pub liquidity: u128,
    pub protocol_fee: u32,
    pub lp_fee: u32,
    #[serde(flatten)]
    pub price: DisplayPrice,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "option_u256_decimal")]
    pub reserve0: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "option_u256_decimal")]
    pub reserve1: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_cardinality: Option<u16>,
}

impl ConcentratedLiquidityState {
    /// Attaches reserves reported by a reserve-introspection contract.
    #[must_use]
    pub fn with_reserves(mut self, reserve0: U256, reserve1: U256) -> Self {
        self.reserve0 = Some(reserve0);
        self.reserve1 = Some(reserve1);
        self
    }

    /// Attaches the V3 oracle observation cursor.
    #[must_use]
    pub fn with_observations(mut self, index: u16, cardinality: u16) -> Self {
        self.observation_index = Some(index);
        self.observation_cardinality = Some(cardinality);
        self
    }
}

/// Active-bin state of a bin-liquidity pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinLiquidityState {
    pub active_id: u32,
    pub protocol_fee: u32,
    pub lp_fee: u32,
    #[serde(flatten)]
    pub price: DisplayPrice,
}

/// Model-specific pool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PoolState {
    ConstantProduct(ConstantProductState),
    ConcentratedLiquidity(ConcentratedLiquidityState),
    BinLiquidity(BinLiquidityState),
}

impl PoolState {
    #[must_use]
    pub fn model(&self) -> PoolModel {
        match self {
            Self::ConstantProduct(_) => PoolModel::ConstantProduct,
            Self::ConcentratedLiquidity(_) => PoolModel::ConcentratedLiquidity,
            Self::BinLiquidity(_) => PoolModel::BinLiquidity,
        }
    }

    /// The derived price, whatever the model.
    #[must_use]
    pub fn price(&self) -> &DisplayPrice {
        match self {
            Self::ConstantProduct(state) => &state.price,
            Self::ConcentratedLiquidity(state) => &state.price,
            Self::BinLiquidity(state) => &state.price,
        }
    }
}

/// Normalized description of one pool on one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    pub network: String,
    pub chain_id: u64,
    pub dex: String,
    pub pool_model: PoolModel,
    pub pool_id: String,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    #[serde(flatten)]
    pub fee: Option<Fee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_spacing: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_step: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<B256>,
    pub state: PoolState,
    pub contracts: BTreeMap<String, Address>,
    pub explorer: String,
}

impl PoolRecord {
    /// Starts a record for `pool_id` on `chain`; the explorer link defaults
    /// to the pool's own page.
    pub fn new(
        chain: &ChainConfig,
        protocol: Protocol,
        pool_id: impl Into<String>,
        token0: TokenInfo,
        token1: TokenInfo,
        state: PoolState,
    ) -> Self {
        let pool_id = pool_id.into();
        Self {
            network: chain.name.clone(),
            chain_id: chain.chain_id,
            dex: protocol.label().to_string(),
            pool_model: state.model(),
            explorer: chain.explorer_address_url(&pool_id),
            pool_id,
            token0,
            token1,
            fee: None,
            tick_spacing: None,
            bin_step: None,
            hooks: None,
            parameters: None,
            state,
            contracts: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_fee(mut self, raw_fee: u32) -> Self {
        self.fee = Some(Fee::from_raw(raw_fee));
        self
    }

    #[must_use]
    pub fn with_tick_spacing(mut self, tick_spacing: i32) -> Self {
        self.tick_spacing = Some(tick_spacing);
        self
    }

    #[must_use]
    pub fn with_bin_step(mut self, bin_step: u16) -> Self {
        self.bin_step = Some(bin_step);
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Option<Address>) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Option<B256>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Records a contract consulted while building this record.
    #[must_use]
    pub fn with_contract(mut self, role: &str, address: Address) -> Self {
        self.contracts.insert(role.to_string(), address);
        self
    }

    /// Points the explorer link at a specific contract instead of the pool.
    #[must_use]
    pub fn with_explorer_contract(mut self, chain: &ChainConfig, address: Address) -> Self {
        self.explorer = chain.explorer_address_url(&address.to_string());
        self
    }
}
