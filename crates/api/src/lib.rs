//! REST API server and endpoints.
//!
//! This crate serves normalized pool state over HTTP:
//! - Pool queries on one network or across every configured network
//! - Transaction lookups with receipt summaries
//! - The supported network and DEX table
//! - Health checks, CORS and request tracing

/// Prelude module for convenient imports.
pub mod prelude;

/// Error types.
pub mod error;
/// Request handlers.
pub mod handlers;
/// API request/response models.
pub mod models;
/// Route definitions.
pub mod routes;
/// Server configuration and startup.
pub mod server;
/// Service layer for API operations.
pub mod services;
/// Application state.
pub mod state;

pub use error::ApiError;
pub use server::{ApiServer, ServerConfig};
pub use services::{FallbackPolicy, PoolQueryService, V3Resolution};
pub use state::AppState;
