//! The catalog service.
//!
//! Sits between the HTTP handlers and the [`ProductStore`]:
//! 1.  Turns a validated page window into a skip/limit query.
//! 2.  Shapes stored documents into client JSON (`_id` as hex string).
//! 3.  Builds reviews (id, defaults, timestamp) and appends them atomically.

use crate::domain::{document_to_json, NewReview, Pagination, ProductId, Review};
use crate::storage::ProductStore;
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Result of appending a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Added(Review),
    /// The update matched no product, or changed nothing.
    NotModified,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self, page: Pagination) -> anyhow::Result<Vec<JsonValue>> {
        let docs = self.store.list(page.skip(), page.limit()).await?;
        tracing::debug!(
            page = page.page(),
            limit = page.limit(),
            returned = docs.len(),
            "Listed products"
        );
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    pub async fn get_product(&self, id: ProductId) -> anyhow::Result<Option<JsonValue>> {
        Ok(self.store.find_by_id(id).await?.map(document_to_json))
    }

    pub async fn add_review(&self, id: ProductId, input: NewReview) -> anyhow::Result<ReviewOutcome> {
        let review = Review::new(input, Utc::now());
        let modified = self.store.push_review(id, &review).await?;
        if modified == 0 {
            return Ok(ReviewOutcome::NotModified);
        }
        tracing::info!(product_id = %id, review_id = %review.id, "Review added");
        Ok(ReviewOutcome::Added(review))
    }

    pub async fn health(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }
}
