use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ValidationError;
use crate::modules::message::model::{MessageFilter, Sender};
use crate::modules::params::{parse_id, parse_limit, parse_page};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub session_id: Option<String>,
}

/// A validated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePage {
    pub filter: MessageFilter,
    pub skip: u64,
    pub take: i64,
}

impl ListMessagesQuery {
    pub fn into_page(self, user_id: i64) -> Result<MessagePage, ValidationError> {
        let page = parse_page(self.page.as_deref())?;
        let limit = parse_limit(self.limit.as_deref())?;

        let session_id = match self.session_id.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_id(raw).ok_or(ValidationError::BadSessionId)?),
        };

        Ok(MessagePage {
            filter: MessageFilter { user_id, session_id },
            skip: page.saturating_mul(limit) as u64,
            take: limit,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    #[validate(required, length(min = 1, message = "Text cannot be empty"))]
    pub text: Option<String>,
    #[validate(required)]
    pub user_id: Option<i64>,
    #[validate(required)]
    pub session_id: Option<i64>,
}

/// A message post whose fields are all present and non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPostMessage {
    pub text: String,
    pub user_id: i64,
    pub session_id: i64,
}

impl PostMessageRequest {
    /// Zero ids count as missing, the same as an absent field.
    pub fn into_valid(self) -> Result<ValidPostMessage, ValidationError> {
        self.validate()
            .map_err(|_| ValidationError::MissingMessageFields)?;

        match (self.text, self.user_id, self.session_id) {
            (Some(text), Some(user_id), Some(session_id)) if user_id != 0 && session_id != 0 => {
                Ok(ValidPostMessage {
                    text,
                    user_id,
                    session_id,
                })
            }
            _ => Err(ValidationError::MissingMessageFields),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    pub user_id: i64,
    pub session_id: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(page: Option<&str>, limit: Option<&str>, session_id: Option<&str>) -> ListMessagesQuery {
        ListMessagesQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            session_id: session_id.map(str::to_string),
        }
    }

    #[test]
    fn default_page_is_first_ten() {
        let page = ListMessagesQuery::default().into_page(3).unwrap();
        assert_eq!(
            page,
            MessagePage {
                filter: MessageFilter { user_id: 3, session_id: None },
                skip: 0,
                take: 10,
            }
        );
    }

    #[test]
    fn skip_is_page_times_limit() {
        let page = query(Some("2"), Some("5"), Some("9")).into_page(1).unwrap();
        assert_eq!(page.skip, 10);
        assert_eq!(page.take, 5);
        assert_eq!(page.filter.session_id, Some(9));
    }

    #[test]
    fn empty_session_id_is_ignored_but_garbage_is_rejected() {
        let page = query(None, None, Some("")).into_page(1).unwrap();
        assert_eq!(page.filter.session_id, None);

        let err = query(None, None, Some("abc")).into_page(1).unwrap_err();
        assert_eq!(err, ValidationError::BadSessionId);
    }

    #[test]
    fn post_message_requires_every_field() {
        let valid: PostMessageRequest =
            serde_json::from_value(json!({ "text": "hi", "userId": 1, "sessionId": 2 })).unwrap();
        assert_eq!(
            valid.into_valid().unwrap(),
            ValidPostMessage { text: "hi".to_string(), user_id: 1, session_id: 2 }
        );

        for body in [
            json!({ "userId": 1, "sessionId": 2 }),
            json!({ "text": "", "userId": 1, "sessionId": 2 }),
            json!({ "text": "hi", "sessionId": 2 }),
            json!({ "text": "hi", "userId": 1 }),
        ] {
            let request: PostMessageRequest = serde_json::from_value(body).unwrap();
            assert_eq!(request.into_valid(), Err(ValidationError::MissingMessageFields));
        }
    }

    #[test]
    fn zero_ids_are_treated_as_missing() {
        for body in [
            json!({ "text": "hi", "userId": 0, "sessionId": 2 }),
            json!({ "text": "hi", "userId": 1, "sessionId": 0 }),
        ] {
            let request: PostMessageRequest = serde_json::from_value(body).unwrap();
            assert_eq!(request.into_valid(), Err(ValidationError::MissingMessageFields));
        }
    }
}
