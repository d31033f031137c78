use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::Database;
use thiserror::Error;

use crate::modules::message::crud::{self as message_crud, MessageCrud};
use crate::modules::message::model::{Message, MessageFilter, NewMessage};
use crate::modules::session::crud::{self as session_crud, SessionCrud};
use crate::modules::session::model::{NewSession, Session};

pub const USERS_COLLECTION: &str = "users";
pub const COUNTERS_COLLECTION: &str = "counters";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
    #[error("No {entity} record found for id {id}")]
    MissingRelation { entity: &'static str, id: i64 },
    #[error("Counter {0} did not return a value")]
    Sequence(String),
}

/// Persistence for sessions and messages, as seen by the handlers.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn create_session(&self, session: NewSession) -> Result<Session, StoreError>;

    /// All sessions of a user, oldest first.
    async fn find_sessions(&self, user_id: i64) -> Result<Vec<Session>, StoreError>;

    async fn create_message(&self, message: NewMessage) -> Result<Message, StoreError>;

    /// Matching messages oldest first, skipping `skip` and returning at most `take`.
    async fn find_messages(
        &self,
        filter: &MessageFilter,
        skip: u64,
        take: i64,
    ) -> Result<Vec<Message>, StoreError>;

    async fn count_messages(&self, filter: &MessageFilter) -> Result<u64, StoreError>;
}

/// Allocates integer ids from the counters collection and refuses rows whose
/// user or session does not exist, as foreign keys would.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Next integer id for `sequence`, starting at 1.
    async fn next_id(&self, sequence: &str) -> Result<i64, StoreError> {
        let counter = self
            .db
            .collection::<Document>(COUNTERS_COLLECTION)
            .find_one_and_update(doc! { "_id": sequence }, doc! { "$inc": { "seq": 1_i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        counter
            .and_then(|c| c.get_i64("seq").ok())
            .ok_or_else(|| StoreError::Sequence(sequence.to_string()))
    }

    async fn ensure_user(&self, id: i64) -> Result<(), StoreError> {
        let count = self
            .db
            .collection::<Document>(USERS_COLLECTION)
            .count_documents(doc! { "_id": id })
            .limit(1)
            .await?;

        if count == 0 {
            return Err(StoreError::MissingRelation { entity: "user", id });
        }
        Ok(())
    }

    async fn ensure_session(&self, id: i64) -> Result<(), StoreError> {
        if !SessionCrud::new(&self.db).exists(id).await? {
            return Err(StoreError::MissingRelation { entity: "session", id });
        }
        Ok(())
    }
}

#[async_trait]
impl ChatStore for MongoStore {
    async fn create_session(&self, session: NewSession) -> Result<Session, StoreError> {
        self.ensure_user(session.user_id).await?;

        let id = self.next_id(session_crud::COLLECTION_NAME).await?;
        let session = Session::new(id, session);
        SessionCrud::new(&self.db).create(&session).await?;

        Ok(session)
    }

    async fn find_sessions(&self, user_id: i64) -> Result<Vec<Session>, StoreError> {
        Ok(SessionCrud::new(&self.db).find_by_user(user_id).await?)
    }

    async fn create_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        self.ensure_user(message.user_id).await?;
        self.ensure_session(message.session_id).await?;

        let id = self.next_id(message_crud::COLLECTION_NAME).await?;
        let message = Message::new(id, message);
        MessageCrud::new(&self.db).create(&message).await?;

        Ok(message)
    }

    async fn find_messages(
        &self,
        filter: &MessageFilter,
        skip: u64,
        take: i64,
    ) -> Result<Vec<Message>, StoreError> {
        Ok(MessageCrud::new(&self.db).find(filter, skip, take).await?)
    }

    async fn count_messages(&self, filter: &MessageFilter) -> Result<u64, StoreError> {
        Ok(MessageCrud::new(&self.db).count(filter).await?)
    }
}
