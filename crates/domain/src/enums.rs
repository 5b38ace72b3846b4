use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A concrete protocol deployment kind that one adapter knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Protocol {
    UniswapV2,
    UniswapV3,
    PancakeV3,
    UniswapV4,
    PancakeV4Cl,
    PancakeV4Bin,
}

impl Protocol {
    /// All protocols, in the order they are reported.
    pub const ALL: [Protocol; 6] = [
        Protocol::UniswapV2,
        Protocol::UniswapV3,
        Protocol::PancakeV3,
        Protocol::UniswapV4,
        Protocol::PancakeV4Cl,
        Protocol::PancakeV4Bin,
    ];

    /// Human-readable label used in pool records and error messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::UniswapV2 => "Uniswap V2",
            Self::UniswapV3 => "Uniswap V3",
            Self::PancakeV3 => "PancakeSwap V3",
            Self::UniswapV4 => "Uniswap V4",
            Self::PancakeV4Cl => "PancakeSwap V4 CL",
            Self::PancakeV4Bin => "PancakeSwap V4 Bin",
        }
    }

    /// Pricing model of pools served by this protocol.
    #[must_use]
    pub fn model(&self) -> PoolModel {
        match self {
            Self::UniswapV2 => PoolModel::ConstantProduct,
            Self::UniswapV3 | Self::PancakeV3 | Self::UniswapV4 | Self::PancakeV4Cl => {
                PoolModel::ConcentratedLiquidity
            }
            Self::PancakeV4Bin => PoolModel::BinLiquidity,
        }
    }

    /// Whether pools are addressed by their own contract address
    /// rather than by a 32-byte id held in a manager contract.
    #[must_use]
    pub fn keyed_by_address(&self) -> bool {
        matches!(self, Self::UniswapV2 | Self::UniswapV3 | Self::PancakeV3)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pool pricing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoolModel {
    ConstantProduct,
    ConcentratedLiquidity,
    BinLiquidity,
}

/// Protocol family token accepted from clients.
///
/// `V3` is ambiguous between the Uniswap and PancakeSwap V3 deployments,
/// which share an ABI; every other family maps to exactly one protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolFamily {
    V2,
    V3,
    UniswapV4,
    UniswapV3,
    PancakeV4Cl,
    PancakeV4Bin,
    PancakeV3,
}

impl ProtocolFamily {
    /// Canonical family tokens, as listed to clients.
    pub const TOKENS: [&'static str; 7] = [
        "v2",
        "v3",
        "uniswapv4",
        "uniswapv3",
        "pancakev4cl",
        "pancakev4bin",
        "pancakev3",
    ];

    /// Canonical token for this family.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
            Self::UniswapV4 => "uniswapv4",
            Self::UniswapV3 => "uniswapv3",
            Self::PancakeV4Cl => "pancakev4cl",
            Self::PancakeV4Bin => "pancakev4bin",
            Self::PancakeV3 => "pancakev3",
        }
    }

    /// Protocols that can serve this family, in priority order.
    #[must_use]
    pub fn protocols(&self) -> &'static [Protocol] {
        match self {
            Self::V2 => &[Protocol::UniswapV2],
            Self::V3 => &[Protocol::UniswapV3, Protocol::PancakeV3],
            Self::UniswapV4 => &[Protocol::UniswapV4],
            Self::UniswapV3 => &[Protocol::UniswapV3],
            Self::PancakeV4Cl => &[Protocol::PancakeV4Cl],
            Self::PancakeV4Bin => &[Protocol::PancakeV4Bin],
            Self::PancakeV3 => &[Protocol::PancakeV3],
        }
    }

    /// Whether pools of this family are addressed by contract address.
    #[must_use]
    pub fn keyed_by_address(&self) -> bool {
        self.protocols().iter().all(Protocol::keyed_by_address)
    }
}

impl FromStr for ProtocolFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v2" => Ok(Self::V2),
            "v3" => Ok(Self::V3),
            "uniswapv4" | "univ4" => Ok(Self::UniswapV4),
            "uniswapv3" | "univ3" => Ok(Self::UniswapV3),
            "pancakev4cl" | "pancakev4-cl" => Ok(Self::PancakeV4Cl),
            "pancakev4bin" | "pancakev4-bin" => Ok(Self::PancakeV4Bin),
            "pancakev3" => Ok(Self::PancakeV3),
            _ => Err(UnknownFamily(s.to_string())),
        }
    }
}

impl fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a family token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported DEX family: {0}")]
pub struct UnknownFamily(pub String);
