use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Counselor,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: i64,
    pub text: String,
    pub sender: Sender,
    pub user_id: i64,
    pub session_id: i64,
    pub created_at: bson::DateTime,
}

impl Message {
    pub fn new(id: i64, message: NewMessage) -> Self {
        Self {
            id,
            text: message.text,
            sender: message.sender,
            user_id: message.user_id,
            session_id: message.session_id,
            created_at: bson::DateTime::now(),
        }
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at
            .to_chrono()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub text: String,
    pub sender: Sender,
    pub user_id: i64,
    pub session_id: i64,
}

impl NewMessage {
    pub fn user(text: String, user_id: i64, session_id: i64) -> Self {
        Self {
            text,
            sender: Sender::User,
            user_id,
            session_id,
        }
    }

    pub fn counselor(text: String, user_id: i64, session_id: i64) -> Self {
        Self {
            text,
            sender: Sender::Counselor,
            user_id,
            session_id,
        }
    }
}

/// Which messages a listing covers: always one user, optionally one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFilter {
    pub user_id: i64,
    pub session_id: Option<i64>,
}

impl MessageFilter {
    pub fn matches(&self, message: &Message) -> bool {
        message.user_id == self.user_id
            && self.session_id.map_or(true, |id| message.session_id == id)
    }
}
