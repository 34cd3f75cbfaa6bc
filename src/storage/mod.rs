//! Product persistence.
//!
//! Handlers never talk to the driver directly; they go through a
//! [`ProductStore`]. The server runs on the MongoDB implementation; the
//! in-memory one backs the test suite.

use crate::domain::{ProductId, Review};
use async_trait::async_trait;
use mongodb::bson::Document;

pub mod connection;
pub mod memory;
pub mod mongo;

pub use connection::ConnectionProvider;
pub use memory::InMemoryProductStore;
pub use mongo::MongoProductStore;

/// Contract for any backing store of product documents.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns up to `limit` documents after skipping `skip`, in the store's
    /// natural order.
    async fn list(&self, skip: u64, limit: u64) -> anyhow::Result<Vec<Document>>;

    /// Looks up exactly one product by id.
    async fn find_by_id(&self, id: ProductId) -> anyhow::Result<Option<Document>>;

    /// Atomically appends `review` to the product's `reviews` array.
    ///
    /// Returns the number of documents modified (0 when no product matched).
    async fn push_review(&self, id: ProductId, review: &Review) -> anyhow::Result<u64>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> anyhow::Result<()>;
}
