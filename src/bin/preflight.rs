use product_catalog::infra::{config, logging};
use product_catalog::{ConnectionProvider, MongoProductStore};
use std::sync::Arc;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Checks that the catalog database is reachable before deploying.\n\
         \n\
         Reads env vars (or .env):\n\
           MONGODB_URI (required), PORT, CORS_ORIGIN\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    logging::init();

    if std::env::args().skip(1).any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if malformed)
    let port = config::port()?;
    let cors_origin = config::cors_origin();
    let uri = config::mongodb_uri();
    if uri.is_empty() {
        anyhow::bail!("MONGODB_URI is not set");
    }
    tracing::info!(port, cors_origin = %cors_origin, "Configuration loaded");

    let provider = Arc::new(ConnectionProvider::new(
        uri,
        config::DATABASE_NAME,
        config::COLLECTION_NAME,
    ));
    provider.connect().await?;
    let store = MongoProductStore::new(provider.clone());
    let count = store.estimated_count().await?;
    tracing::info!(
        database = provider.database_name(),
        collection = provider.collection_name(),
        products = count,
        "Preflight OK"
    );

    provider.shutdown().await;
    Ok(())
}
