use axum::{extract::State, Json};

use crate::error::{ApiError, JsonBody, PathParam, ValidationError};
use crate::modules::params::parse_id;
use crate::modules::session::{
    model::Session,
    schema::{CreateSessionRequest, SessionResponse},
};
use crate::AppState;

fn to_session_response(s: &Session) -> SessionResponse {
    SessionResponse {
        id: s.id,
        user_id: s.user_id,
        title: s.title.clone(),
        created_at: s.created_at_rfc3339(),
    }
}

pub async fn create_session(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let new_session = payload.into_valid()?;

    let session = state.store.create_session(new_session).await?;
    tracing::info!(session_id = session.id, user_id = session.user_id, "session created");

    Ok(Json(to_session_response(&session)))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<String>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let user_id = parse_id(&user_id).ok_or(ValidationError::BadUserId)?;

    let sessions = state.store.find_sessions(user_id).await?;

    Ok(Json(sessions.iter().map(to_session_response).collect()))
}
