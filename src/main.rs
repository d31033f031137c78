use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use counsel_chat::services::llm::CohereClient;
use counsel_chat::services::store::MongoStore;
use counsel_chat::{config, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_target(false)
        .init();

    let db = config::database::connect().await?;
    let completion = CohereClient::from_env();
    tracing::info!(model = completion.model(), "completion client ready");

    let state = AppState::new(Arc::new(MongoStore::new(db)), Arc::new(completion));

    let addr = config::server::bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("backend running on http://localhost:{}", addr.port());

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
