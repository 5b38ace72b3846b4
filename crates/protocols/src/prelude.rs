//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use dexpool_protocols::prelude::*;
//! ```

// Adapters
pub use crate::pancake_v4_bin::PancakeV4BinAdapter;
pub use crate::pancake_v4_cl::PancakeV4ClAdapter;
pub use crate::uniswap_v2::UniswapV2Adapter;
pub use crate::uniswap_v4::UniswapV4Adapter;
pub use crate::v3::V3Adapter;
pub use crate::{ChainFailure, PoolAdapter, SearchOutcome};

// Chain access
pub use crate::alloy_reader::{AlloyConnector, AlloyReader};
pub use crate::rpc::{AdapterContext, ChainConnector, ChainReader};
pub use crate::token::TokenResolver;

// Errors
pub use crate::error::{AdapterError, RpcError};

// Transactions
pub use crate::transaction::{
    ReceiptSummary, TransactionDetails, TransactionError, TransactionService, TransactionSummary,
};
