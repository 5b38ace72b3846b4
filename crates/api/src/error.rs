//! API error type and its JSON rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dexpool_domain::ProtocolFamily;
use dexpool_protocols::error::AdapterError;
use dexpool_protocols::transaction::TransactionError;
use serde_json::json;

/// Errors returned by the HTTP API.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The network key is not in the configuration table.
    #[error("Invalid network")]
    InvalidNetwork { available: Vec<String> },
    /// The DEX family token is not recognised.
    #[error("Unsupported DEX")]
    UnsupportedDex,
    /// A transaction hash was supplied where a pool address was expected.
    #[error("Invalid pool ID")]
    TransactionHashAsPoolId { provided: String },
    /// Any other malformed request.
    #[error("{0}")]
    BadRequest(String),
    /// Nothing matched the request.
    #[error("{0}")]
    NotFound(String),
    /// A remote read failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidNetwork { .. }
            | Self::UnsupportedDex
            | Self::TransactionHashAsPoolId { .. }
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AdapterError> for ApiError {
    fn from(err: AdapterError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        if err.is_client_error() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::InvalidNetwork { available } => json!({
                "error": self.to_string(),
                "availableNetworks": available,
            }),
            Self::UnsupportedDex => json!({
                "error": self.to_string(),
                "supportedDEXs": ProtocolFamily::TOKENS,
            }),
            Self::TransactionHashAsPoolId { provided } => json!({
                "error": self.to_string(),
                "message": "The provided value appears to be a transaction hash, not a pool ID. Pool IDs should be contract addresses.",
                "providedValue": provided,
                "hint": "Use /api/transaction/{network}/{txHash} to query transaction details",
            }),
            Self::BadRequest(message) => json!({
                "error": "Bad request",
                "message": message,
            }),
            Self::NotFound(message) | Self::Internal(message) => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexpool_protocols::error::RpcError;

    #[test]
    fn test_adapter_errors_split_by_fault() {
        let client: ApiError = AdapterError::UnsupportedChain {
            protocol: "PancakeSwap V3",
            chain: "ETH".to_string(),
        }
        .into();
        assert_eq!(client.status(), StatusCode::BAD_REQUEST);

        let server: ApiError = AdapterError::Query {
            protocol: "Uniswap V3",
            source: RpcError::call("slot0()", "execution reverted"),
        }
        .into();
        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(server.to_string().starts_with("Failed to query Uniswap V3 pool"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::UnsupportedDex.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound("Pool not found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidNetwork { available: vec![] }.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
