//! Request handlers.

use crate::error::ApiError;
use crate::models::{HealthResponse, SupportedResponse};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use dexpool_domain::PoolRecord;
use dexpool_protocols::transaction::TransactionDetails;
use tracing::info;

/// `GET /api/pool/{dex}/{network}/{poolId}`
pub async fn get_pool(
    State(state): State<AppState>,
    Path((dex, network, pool_id)): Path<(String, String, String)>,
) -> Result<Json<PoolRecord>, ApiError> {
    info!(dex = %dex, network = %network, pool = %pool_id, "Pool query");
    let record = state.service.query_pool(&dex, &network, &pool_id).await?;
    Ok(Json(record))
}

/// `GET /api/pool/{dex}/{poolId}`
pub async fn get_pool_any_network(
    State(state): State<AppState>,
    Path((dex, pool_id)): Path<(String, String)>,
) -> Result<Json<PoolRecord>, ApiError> {
    info!(dex = %dex, pool = %pool_id, "Cross-chain pool query");
    let record = state
        .service
        .query_pool_across_chains(&dex, &pool_id)
        .await?;
    Ok(Json(record))
}

/// `GET /api/supported`
pub async fn get_supported(State(state): State<AppState>) -> Json<SupportedResponse> {
    Json(state.service.supported())
}

/// `GET /api/transaction/{network}/{txHash}`
pub async fn get_transaction(
    State(state): State<AppState>,
    Path((network, tx_hash)): Path<(String, String)>,
) -> Result<Json<TransactionDetails>, ApiError> {
    let details = state.service.transaction(&network, &tx_hash).await?;
    Ok(Json(details))
}

/// `GET /api/transaction/{txHash}`
pub async fn get_transaction_any_network(
    State(state): State<AppState>,
    Path(tx_hash): Path<String>,
) -> Result<Json<TransactionDetails>, ApiError> {
    let details = state.service.transaction_across_chains(&tx_hash).await?;
    Ok(Json(details))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
