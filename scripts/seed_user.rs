//! Run with: cargo run --bin seed_user -- [id]
//!
//! Sessions and messages must reference an existing user. This inserts one
//! (default id 1) when it is not there yet.

use anyhow::Context;
use bson::{doc, Document};
use counsel_chat::config::database;
use counsel_chat::services::store::USERS_COLLECTION;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let id: i64 = match env::args().nth(1) {
        Some(raw) => raw.parse().with_context(|| format!("invalid user id {raw:?}"))?,
        None => 1,
    };

    let db = database::connect().await?;
    let result = db
        .collection::<Document>(USERS_COLLECTION)
        .update_one(
            doc! { "_id": id },
            doc! { "$setOnInsert": { "created_at": bson::DateTime::now() } },
        )
        .upsert(true)
        .await?;

    if result.upserted_id.is_some() {
        println!("✓ User {} created", id);
    } else {
        println!("User {} already exists", id);
    }

    Ok(())
}
