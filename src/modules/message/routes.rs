use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::message::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(controller::post_message))
        .route("/messages/{user_id}", get(controller::list_messages))
}
