use crate::modules::message::model::{Message, MessageFilter};
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "messages";

pub struct MessageCrud {
    collection: Collection<Message>,
}

impl MessageCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    fn filter_doc(filter: &MessageFilter) -> Document {
        let mut query = doc! { "user_id": filter.user_id };
        if let Some(session_id) = filter.session_id {
            query.insert("session_id", session_id);
        }
        query
    }

    pub async fn create(&self, message: &Message) -> Result<(), mongodb::error::Error> {
        self.collection.insert_one(message).await?;
        Ok(())
    }

    /// Oldest first; `_id` breaks ties between messages stored in the same millisecond.
    pub async fn find(
        &self,
        filter: &MessageFilter,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Message>, mongodb::error::Error> {
        let cursor = self
            .collection
            .find(Self::filter_doc(filter))
            .sort(doc! { "created_at": 1, "_id": 1 })
            .skip(skip)
            .limit(limit)
            .await?;

        cursor.try_collect().await
    }

    pub async fn count(&self, filter: &MessageFilter) -> Result<u64, mongodb::error::Error> {
        self.collection.count_documents(Self::filter_doc(filter)).await
    }
}
