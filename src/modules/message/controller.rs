use axum::{extract::State, Json};
use tracing::{debug, warn};

use crate::error::{ApiError, JsonBody, PathParam, QueryParams, ValidationError};
use crate::modules::message::{
    model::{Message, NewMessage},
    schema::{ListMessagesQuery, MessageListResponse, MessageResponse, PostMessageRequest},
};
use crate::modules::params::parse_id;
use crate::AppState;

fn to_message_response(m: &Message) -> MessageResponse {
    MessageResponse {
        id: m.id,
        text: m.text.clone(),
        sender: m.sender,
        user_id: m.user_id,
        session_id: m.session_id,
        created_at: m.created_at_rfc3339(),
    }
}

pub async fn list_messages(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<String>,
    QueryParams(query): QueryParams<ListMessagesQuery>,
) -> Result<Json<MessageListResponse>, ApiError> {
    let user_id = parse_id(&user_id).ok_or(ValidationError::BadUserId)?;
    let page = query.into_page(user_id)?;

    // The page and the total are independent reads.
    let (messages, total) = futures::try_join!(
        state.store.find_messages(&page.filter, page.skip, page.take),
        state.store.count_messages(&page.filter),
    )?;

    Ok(Json(MessageListResponse {
        messages: messages.iter().map(to_message_response).collect(),
        total,
    }))
}

/// Stores the user's message, asks the completion service for a reply and
/// stores that as the counselor's message.
///
/// The steps run in order with no rollback. If the completion call or the
/// second write fails, the user message stays stored without a reply and the
/// caller gets a 500; the orphan remains visible through `list_messages`.
pub async fn post_message(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PostMessageRequest>,
) -> Result<Json<[MessageResponse; 2]>, ApiError> {
    let request = payload.into_valid()?;
    let (user_id, session_id) = (request.user_id, request.session_id);

    let user_message = state
        .store
        .create_message(NewMessage::user(request.text, user_id, session_id))
        .await?;

    let completion = match state.completion.reply(&user_message.text).await {
        Ok(completion) => completion,
        Err(e) => {
            warn!(
                message_id = user_message.id,
                user_id,
                session_id,
                error = %e,
                "completion failed, user message left without a reply"
            );
            return Err(e.into());
        }
    };
    debug!(generation_id = ?completion.id, "completion received");

    let reply = completion.text.trim().to_string();
    let counselor_message = match state
        .store
        .create_message(NewMessage::counselor(reply, user_id, session_id))
        .await
    {
        Ok(message) => message,
        Err(e) => {
            warn!(
                message_id = user_message.id,
                user_id,
                session_id,
                error = %e,
                "storing reply failed, user message left without a reply"
            );
            return Err(e.into());
        }
    };

    Ok(Json([
        to_message_response(&user_message),
        to_message_response(&counselor_message),
    ]))
}
