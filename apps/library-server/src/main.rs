//! Library Server binary.

use library_server::{config::Config, init_tracing, serve};
use library_store::{MemoryLibraryStore, SqliteLibraryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!("Starting Library Server");

    match config.database_url.clone() {
        Some(database_url) => {
            let store = SqliteLibraryStore::connect(&database_url).await?;
            store.init().await?;
            tracing::info!("Using SQLite store");
            serve(config, store).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            serve(config, MemoryLibraryStore::new()).await
        }
    }
}
