//! Network and deployment configuration.
//!
//! A [`NetworkConfig`] is an ordered, immutable table of chains. The order
//! of `chains` is the order in which cross-chain searches visit them.

use crate::enums::Protocol;
use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Errors raised while building or loading a network table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read network config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid network config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("network table is empty")]
    Empty,
    #[error("duplicate network key: {0}")]
    DuplicateKey(String),
    #[error("invalid RPC URL for {key}: {url}")]
    InvalidRpcUrl { key: String, url: String },
}

/// Native gas asset of a chain, reported for the zero-address currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeAsset {
    pub symbol: String,
    pub name: String,
}

impl NativeAsset {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// A V2-style deployment, identified by its factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryDeployment {
    pub factory: Address,
}

/// A V3-style deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct V3Deployment {
    pub factory: Address,
    pub quoter: Address,
}

/// Uniswap V4: pool manager plus the quoter and state-view lenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniswapV4Deployment {
    pub pool_manager: Address,
    pub quoter: Address,
    pub state_view: Address,
    /// The quoter exposes `getUniswapV4PoolReserve`.
    #[serde(default)]
    pub reserve_introspection: bool,
}

/// PancakeSwap V4: the pool manager answers key and state reads itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolManagerDeployment {
    pub pool_manager: Address,
    pub quoter: Address,
}

/// Per-family deployments on one chain. A missing entry means unsupported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniswap_v2: Option<FactoryDeployment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pancake_v2: Option<FactoryDeployment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniswap_v3: Option<V3Deployment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pancake_v3: Option<V3Deployment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniswap_v4: Option<UniswapV4Deployment>,
    #[serde(default, rename = "pancakeV4CL", skip_serializing_if = "Option::is_none")]
    pub pancake_v4_cl: Option<PoolManagerDeployment>,
    #[serde(default, rename = "pancakeV4Bin", skip_serializing_if = "Option::is_none")]
    pub pancake_v4_bin: Option<PoolManagerDeployment>,
}

impl Deployments {
    /// Whether `protocol` can be queried on this chain.
    #[must_use]
    pub fn supports(&self, protocol: Protocol) -> bool {
        match protocol {
            Protocol::UniswapV2 => self.v2_factory().is_some(),
            Protocol::UniswapV3 => self.uniswap_v3.is_some(),
            Protocol::PancakeV3 => self.pancake_v3.is_some(),
            Protocol::UniswapV4 => self.uniswap_v4.is_some(),
            Protocol::PancakeV4Cl => self.pancake_v4_cl.is_some(),
            Protocol::PancakeV4Bin => self.pancake_v4_bin.is_some(),
        }
    }

    /// Factory used for V2 pairs; Uniswap takes precedence over PancakeSwap.
    #[must_use]
    pub fn v2_factory(&self) -> Option<Address> {
        self.uniswap_v2
            .or(self.pancake_v2)
            .map(|deployment| deployment.factory)
    }

    /// The V3 deployment serving `protocol`, if any.
    #[must_use]
    pub fn v3(&self, protocol: Protocol) -> Option<&V3Deployment> {
        match protocol {
            Protocol::UniswapV3 => self.uniswap_v3.as_ref(),
            Protocol::PancakeV3 => self.pancake_v3.as_ref(),
            _ => None,
        }
    }

    /// Names of the configured deployments, as listed to clients.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let entries = [
            ("uniswapV2", self.uniswap_v2.is_some()),
            ("pancakeV2", self.pancake_v2.is_some()),
            ("uniswapV3", self.uniswap_v3.is_some()),
            ("pancakeV3", self.pancake_v3.is_some()),
            ("uniswapV4", self.uniswap_v4.is_some()),
            ("pancakeV4CL", self.pancake_v4_cl.is_some()),
            ("pancakeV4Bin", self.pancake_v4_bin.is_some()),
        ];
        entries
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}

/// One EVM chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Upper-case lookup key, e.g. `BASE`.
    pub key: String,
    /// Display name reported in pool records.
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub explorer_url: String,
    pub native_asset: NativeAsset,
    #[serde(default)]
    pub deployments: Deployments,
}

impl ChainConfig {
    /// Parsed RPC endpoint.
    pub fn rpc_endpoint(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.rpc_url).map_err(|_| ConfigError::InvalidRpcUrl {
            key: self.key.clone(),
            url: self.rpc_url.clone(),
        })
    }

    /// Explorer page for an address or id.
    #[must_use]
    pub fn explorer_address_url(&self, target: &str) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), target)
    }

    /// Explorer page for a transaction.
    #[must_use]
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), hash)
    }

    #[must_use]
    pub fn supports(&self, protocol: Protocol) -> bool {
        self.deployments.supports(protocol)
    }
}

/// Ordered table of supported chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    chains: Vec<ChainConfig>,
}

impl NetworkConfig {
    /// Builds a table, rejecting empty tables, duplicate keys and
    /// unparseable RPC URLs. Keys are normalized to upper case.
    pub fn new(chains: Vec<ChainConfig>) -> Result<Self, ConfigError> {
        if chains.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(chains.len());
        for mut chain in chains {
            chain.key = chain.key.to_uppercase();
            if !seen.insert(chain.key.clone()) {
                return Err(ConfigError::DuplicateKey(chain.key));
            }
            chain.rpc_endpoint()?;
            normalized.push(chain);
        }
        Ok(Self { chains: normalized })
    }

    /// Parses a JSON table of the form `{"chains": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: NetworkConfig = serde_json::from_str(json)?;
        Self::new(raw.chains)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Replaces RPC URLs with `<KEY>_RPC_URL` environment variables when set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_rpc_overrides(|key| std::env::var(format!("{key}_RPC_URL")).ok())
    }

    /// Replaces RPC URLs with whatever `lookup` returns for each chain key.
    pub fn with_rpc_overrides<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let chains = self
            .chains
            .into_iter()
            .map(|mut chain| {
                if let Some(url) = lookup(&chain.key) {
                    chain.rpc_url = url;
                }
                chain
            })
            .collect();
        Self::new(chains)
    }

    /// Chains in declared order.
    #[must_use]
    pub fn chains(&self) -> &[ChainConfig] {
        &self.chains
    }

    /// Case-insensitive lookup by key.
    #[must_use]
    pub fn chain(&self, key: &str) -> Option<&ChainConfig> {
        self.chains
            .iter()
            .find(|chain| chain.key.eq_ignore_ascii_case(key))
    }

    /// Chains that have a deployment for `protocol`, in declared order.
    pub fn chains_supporting(&self, protocol: Protocol) -> impl Iterator<Item = &ChainConfig> {
        self.chains
            .iter()
            .filter(move |chain| chain.supports(protocol))
    }

    /// Chain keys in declared order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.chains.iter().map(|chain| chain.key.as_str()).collect()
    }
}

impl Default for NetworkConfig {
    /// The built-in mainnet table: Base, BSC, Ethereum and Monad.
    fn default() -> Self {
        Self {
            chains: vec![base(), bsc(), ethereum(), monad()],
        }
    }
}

const PANCAKE_V4_CL: PoolManagerDeployment = PoolManagerDeployment {
    pool_manager: address!("a0ffb9c1ce1fe56963b0321b32e7a0302114058b"),
    quoter: address!("d0737c9762912dd34c3271197e362aa736df0926"),
};

const PANCAKE_V4_BIN: PoolManagerDeployment = PoolManagerDeployment {
    pool_manager: address!("c697d2898e0d09264376196696c51d7abbbaa4a9"),
    quoter: address!("c631f4b0fc2dd68ad45f74b2942628db117dd359"),
};

fn base() -> ChainConfig {
    ChainConfig {
        key: "BASE".to_string(),
        name: "Base".to_string(),
        chain_id: 8453,
        rpc_url: "https://mainnet.base.org".to_string(),
        explorer_url: "https://basescan.org".to_string(),
        native_asset: NativeAsset::new("ETH", "Ethereum"),
        deployments: Deployments {
            uniswap_v3: Some(V3Deployment {
                factory: address!("33128a8fC17869897dcE68Ed026d694621f6FDfD"),
                quoter: address!("3d4e44Eb1374240CE5F1B871ab261CD16335B76a"),
            }),
            uniswap_v4: Some(UniswapV4Deployment {
                pool_manager: address!("7c5f5a4bbd8fd63184577525326123b519429bdc"),
                quoter: address!("e4eE68bb833EB2C0D6AaE778F3Ce9dE72008ac97"),
                state_view: address!("A3c0c9b65baD0b08107Aa264b0f3dB444b867A71"),
                reserve_introspection: false,
            }),
            pancake_v4_cl: Some(PANCAKE_V4_CL),
            pancake_v4_bin: Some(PANCAKE_V4_BIN),
            ..Deployments::default()
        },
    }
}

fn bsc() -> ChainConfig {
    ChainConfig {
        key: "BSC".to_string(),
        name: "BNB Smart Chain".to_string(),
        chain_id: 56,
        rpc_url: "https://bsc-dataseed.binance.org/".to_string(),
        explorer_url: "https://bscscan.com".to_string(),
        native_asset: NativeAsset::new("BNB", "BNB"),
        deployments: Deployments {
            uniswap_v3: Some(V3Deployment {
                factory: address!("dB1d10011AD0Ff90774D0C6Bb92e5C5c8b4461F7"),
                quoter: address!("B048Bbc1Ee6b733FFfCFb9e9CeF7375518e25997"),
            }),
            pancake_v3: Some(V3Deployment {
                factory: address!("0BFbCF9fa4f9C56B0F40a671Ad40E0805A091865"),
                quoter: address!("B048Bbc1Ee6b733FFfCFb9e9CeF7375518e25997"),
            }),
            uniswap_v4: Some(UniswapV4Deployment {
                pool_manager: address!("28e2ea090877bf75740558f6bfb36a5ffee9e9df"),
                quoter: address!("EDA83eA10F9020FB208E48a5A9c02ef7e7135Ebf"),
                state_view: address!("d13Dd3D6E93f276FAfc9Db9E6BB47C1180aeE0c4"),
                reserve_introspection: false,
            }),
            pancake_v4_cl: Some(PANCAKE_V4_CL),
            pancake_v4_bin: Some(PANCAKE_V4_BIN),
            ..Deployments::default()
        },
    }
}

fn ethereum() -> ChainConfig {
    ChainConfig {
        key: "ETH".to_string(),
        name: "Ethereum".to_string(),
        chain_id: 1,
        rpc_url: "https://eth.llamarpc.com".to_string(),
        explorer_url: "https://etherscan.io".to_string(),
        native_asset: NativeAsset::new("ETH", "Ethereum"),
        deployments: Deployments {
            uniswap_v3: Some(V3Deployment {
                factory: address!("1F98431c8aD98523631AE4a59f267346ea31F984"),
                quoter: address!("b27308f9F90D607463bb33eA1BeBb41C27CE5AB6"),
            }),
            uniswap_v4: Some(UniswapV4Deployment {
                pool_manager: address!("000000000004444c5dc75cB358380D2e3dE08A90"),
                quoter: address!("210e55C38c8D3E2803B9bFE37DFD3158e6f8e0f9"),
                state_view: address!("7ffe42c4a5deea5b0fec41c94c136cf115597227"),
                reserve_introspection: true,
            }),
            ..Deployments::default()
        },
    }
}

fn monad() -> ChainConfig {
    let lens = address!("0393c0Bc9Fa2b8307396a565C5B14C4Ee285A11f");
    ChainConfig {
        key: "MONAD".to_string(),
        name: "Monad".to_string(),
        chain_id: 143,
        rpc_url: "https://rpc1.monad.xyz".to_string(),
        explorer_url: "https://monadvision.com".to_string(),
        native_asset: NativeAsset::new("MON", "Monad"),
        deployments: Deployments {
            uniswap_v2: Some(FactoryDeployment {
                factory: address!("182a927119d56008d921126764bf884221b10f59"),
            }),
            pancake_v2: Some(FactoryDeployment {
                factory: address!("02a84c1b3bbd7401a5f7fa98a384ebc70bb5749e"),
            }),
            uniswap_v3: Some(V3Deployment {
                factory: address!("204faca1764b154221e35c0d20abb3c525710498"),
                quoter: lens,
            }),
            pancake_v3: Some(V3Deployment {
                factory: address!("0bfbcf9fa4f9c56b0f40a671ad40e0805a091865"),
                quoter: lens,
            }),
            uniswap_v4: Some(UniswapV4Deployment {
                pool_manager: address!("188d586ddcf52439676ca21a244753fa19f9ea8e"),
                quoter: lens,
                state_view: address!("77395f3b2e73ae90843717371294fa97cc419d64"),
                reserve_introspection: false,
            }),
            ..Deployments::default()
        },
    }
}
