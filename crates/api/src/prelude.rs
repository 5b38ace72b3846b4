//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use dexpool_api::prelude::*;
//! ```

// Errors
pub use crate::error::ApiError;

// Models
pub use crate::models::{HealthResponse, SupportedNetwork, SupportedResponse};

// Routing and server
pub use crate::routes::create_router;
pub use crate::server::{ApiServer, ServerConfig};

// Services
pub use crate::services::{FallbackPolicy, PoolQueryService, V3Resolution};
pub use crate::state::AppState;
