use crate::modules::session::model::Session;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

pub const COLLECTION_NAME: &str = "sessions";

pub struct SessionCrud {
    collection: Collection<Session>,
}

impl SessionCrud {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_NAME),
        }
    }

    pub async fn create(&self, session: &Session) -> Result<(), mongodb::error::Error> {
        self.collection.insert_one(session).await?;
        Ok(())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, mongodb::error::Error> {
        let count = self
            .collection
            .count_documents(doc! { "_id": id })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<Session>, mongodb::error::Error> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;

        cursor.try_collect().await
    }
}
