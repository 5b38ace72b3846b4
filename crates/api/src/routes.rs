//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/pool/{dex}/{network}/{pool_id}", get(handlers::get_pool))
        .route("/pool/{dex}/{pool_id}", get(handlers::get_pool_any_network))
        .route("/supported", get(handlers::get_supported))
        .route(
            "/transaction/{network}/{tx_hash}",
            get(handlers::get_transaction),
        )
        .route(
            "/transaction/{tx_hash}",
            get(handlers::get_transaction_any_network),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
