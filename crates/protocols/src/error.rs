//! Error types for chain reads and protocol adapters.

use std::fmt;
use thiserror::Error;

/// Failure of a single remote read.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// The chain's RPC URL could not be turned into a provider.
    #[error("invalid RPC endpoint: {0}")]
    Endpoint(String),
    /// A contract call reverted or could not be decoded.
    #[error("{call} failed: {message}")]
    Call { call: &'static str, message: String },
    /// A raw JSON-RPC request failed.
    #[error("{method} failed: {message}")]
    Transport {
        method: &'static str,
        message: String,
    },
}

impl RpcError {
    pub fn call(call: &'static str, err: impl fmt::Display) -> Self {
        Self::Call {
            call,
            message: err.to_string(),
        }
    }

    pub fn transport(method: &'static str, err: impl fmt::Display) -> Self {
        Self::Transport {
            method,
            message: err.to_string(),
        }
    }
}

/// Failure of one adapter attempt on one chain.
#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("network {0} is not configured")]
    UnknownChain(String),
    #[error("{protocol} not supported on {chain}")]
    UnsupportedChain {
        protocol: &'static str,
        chain: String,
    },
    #[error("invalid {protocol} pool identifier {value}: expected {expected}")]
    InvalidIdentifier {
        protocol: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("Failed to query {protocol} pool: {source}")]
    Query {
        protocol: &'static str,
        #[source]
        source: RpcError,
    },
}

impl AdapterError {
    /// Whether the caller, not the chain, is at fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Query { .. })
    }
}
