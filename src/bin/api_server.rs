// src/bin/api_server.rs

use product_catalog::infra::{config, logging};
use product_catalog::transport;
use product_catalog::{CatalogService, ConnectionProvider, MongoProductStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    logging::init();

    let port = config::port()?;
    let cors_origin = config::cors_origin();

    // --- Connection Provider Initialization ---
    let provider = Arc::new(ConnectionProvider::new(
        config::mongodb_uri(),
        config::DATABASE_NAME,
        config::COLLECTION_NAME,
    ));
    if let Err(e) = provider.connect().await {
        tracing::error!(error = %e, "Failed to connect to MongoDB");
        std::process::exit(1);
    }
    tracing::info!(
        database = provider.database_name(),
        collection = provider.collection_name(),
        "Connected to MongoDB"
    );

    // --- Service Initialization ---
    let store = Arc::new(MongoProductStore::new(provider.clone()));
    let app_state = transport::http::AppState::new(CatalogService::new(store));

    // --- API Server Initialization ---
    let app = transport::http::build_app(app_state, &cors_origin)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        cors_origin = %cors_origin,
        "API server listening (Swagger UI at /swagger-ui)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    provider.shutdown().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received (Ctrl+C), draining connections");
}
