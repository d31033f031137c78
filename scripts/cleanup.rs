//! Run with: cargo run --bin cleanup

use bson::Document;
use counsel_chat::config::database;
use counsel_chat::modules::{message, session};
use counsel_chat::services::store::COUNTERS_COLLECTION;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("Connecting to MongoDB...");
    let db = database::connect().await?;

    // Users are owned outside this service and are left alone.
    for name in [
        message::crud::COLLECTION_NAME,
        session::crud::COLLECTION_NAME,
        COUNTERS_COLLECTION,
    ] {
        println!("Dropping {} collection...", name);
        db.collection::<Document>(name).drop().await?;
        println!("✓ {} dropped", name);
    }

    println!("\nCollections remaining:");
    let collections = db.list_collection_names().await?;
    for name in collections {
        println!("  - {}", name);
    }

    println!("\n✓ Cleanup complete!");
    Ok(())
}
