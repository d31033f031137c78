use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub created_at: bson::DateTime,
}

impl Session {
    pub fn new(id: i64, session: NewSession) -> Self {
        Self {
            id,
            user_id: session.user_id,
            title: session.title,
            created_at: bson::DateTime::now(),
        }
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at
            .to_chrono()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// A validated session that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub user_id: i64,
    pub title: String,
}
