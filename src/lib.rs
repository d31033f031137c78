use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::llm::CompletionService;
use crate::services::store::ChatStore;

pub mod config;
pub mod error;
pub mod modules;
pub mod services;

/// Dependencies shared by every request for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChatStore>,
    pub completion: Arc<dyn CompletionService>,
}

impl AppState {
    pub fn new(store: Arc<dyn ChatStore>, completion: Arc<dyn CompletionService>) -> Self {
        Self { store, completion }
    }
}

/// Builds the full HTTP surface: message and session routes, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(modules::message::routes::routes())
        .merge(modules::session::routes::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
