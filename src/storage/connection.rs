//! Shared MongoDB client, created once and handed to the store.

use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;

/// Owns the single client used by every request.
///
/// Constructed by the startup routine and injected where needed; connecting
/// more than once returns the existing client.
pub struct ConnectionProvider {
    uri: String,
    database: String,
    collection: String,
    client: OnceCell<Client>,
}

impl ConnectionProvider {
    pub fn new(
        uri: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
            client: OnceCell::new(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    /// Returns the client, connecting on first use.
    ///
    /// The first connection issues a `ping` so an unreachable server is
    /// reported here instead of on the first query.
    pub async fn connect(&self) -> anyhow::Result<&Client> {
        let client = self
            .client
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(&self.uri).await?;
                client
                    .database(&self.database)
                    .run_command(doc! { "ping": 1 }, None)
                    .await?;
                tracing::debug!(database = %self.database, "MongoDB ping succeeded");
                Ok::<_, mongodb::error::Error>(client)
            })
            .await?;
        Ok(client)
    }

    pub async fn database(&self) -> anyhow::Result<Database> {
        Ok(self.connect().await?.database(&self.database))
    }

    /// Handle to the product collection.
    pub async fn products(&self) -> anyhow::Result<Collection<Document>> {
        Ok(self.database().await?.collection::<Document>(&self.collection))
    }

    /// Closes the client if one was created.
    pub async fn shutdown(&self) {
        if let Some(client) = self.client.get() {
            client.clone().shutdown().await;
            tracing::info!("MongoDB client closed");
        }
    }
}
