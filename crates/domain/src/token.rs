use crate::config::NativeAsset;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Decimals assumed for the native asset and for tokens whose metadata
/// could not be read.
pub const DEFAULT_DECIMALS: u8 = 18;

/// ERC20 metadata of one side of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(
        address: Address,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
        }
    }

    /// The chain's native asset, reported for the zero-address currency.
    pub fn native(native: &NativeAsset) -> Self {
        Self::new(
            Address::ZERO,
            native.symbol.clone(),
            native.name.clone(),
            DEFAULT_DECIMALS,
        )
    }

    /// Placeholder metadata for a token whose reads failed.
    pub fn unknown(address: Address) -> Self {
        Self::new(address, "Unknown", "Unknown Token", DEFAULT_DECIMALS)
    }
}
