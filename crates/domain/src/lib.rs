//! Domain types for normalized DEX pool queries.
//!
//! This crate holds everything that does not touch the network:
//! - Protocol, family and pool-model enums
//! - Token and pool records returned to clients
//! - The network/deployment configuration table
//! - Fixed-point price calculators and packed-field decoders
//! - Pool and transaction identifier classification

/// Network and deployment configuration.
pub mod config;
/// Protocol, family and pool-model enums.
pub mod enums;
/// Fee representation.
pub mod fees;
/// Identifier parsing and classification.
pub mod identifier;
/// Fixed-point price calculators.
pub mod math;
/// Packed parameters-word decoders.
pub mod parameters;
/// Normalized pool records.
pub mod pool;
/// Display price value object.
pub mod price;
/// Serde helpers for on-chain integers.
pub mod serde_util;
/// Token metadata.
pub mod token;

pub use config::{ChainConfig, ConfigError, Deployments, NativeAsset, NetworkConfig};
pub use enums::{PoolModel, Protocol, ProtocolFamily};
pub use fees::Fee;
pub use pool::{PoolKey, PoolParameters, PoolRecord, PoolState};
pub use price::DisplayPrice;
pub use token::TokenInfo;
