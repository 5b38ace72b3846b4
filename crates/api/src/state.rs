//! Shared application state.

use crate::services::PoolQueryService;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PoolQueryService>,
}

impl AppState {
    pub fn new(service: PoolQueryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
