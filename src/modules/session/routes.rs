use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::session::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(controller::create_session))
        .route("/sessions/{user_id}", get(controller::list_sessions))
}
