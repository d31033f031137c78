use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;
use crate::modules::params::IdInput;
use crate::modules::session::model::NewSession;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub user_id: Option<IdInput>,
    #[validate(required, length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
}

impl CreateSessionRequest {
    pub fn into_valid(self) -> Result<NewSession, ValidationError> {
        self.validate()
            .map_err(|_| ValidationError::MissingSessionFields)?;

        let user_id = self
            .user_id
            .as_ref()
            .and_then(IdInput::to_id)
            .ok_or(ValidationError::MissingSessionFields)?;
        let title = self.title.ok_or(ValidationError::MissingSessionFields)?;

        Ok(NewSession { user_id, title })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: String,
}
