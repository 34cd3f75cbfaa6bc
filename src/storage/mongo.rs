//! MongoDB-backed product store.

use crate::domain::{ProductId, Review};
use crate::storage::{ConnectionProvider, ProductStore};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use std::sync::Arc;

pub struct MongoProductStore {
    provider: Arc<ConnectionProvider>,
}

impl MongoProductStore {
    pub fn new(provider: Arc<ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// Estimated number of product documents (collection metadata, no scan).
    pub async fn estimated_count(&self) -> anyhow::Result<u64> {
        let products = self.provider.products().await?;
        Ok(products.estimated_document_count(None).await?)
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn list(&self, skip: u64, limit: u64) -> anyhow::Result<Vec<Document>> {
        let products = self.provider.products().await?;
        let options = FindOptions::builder()
            .skip(skip)
            .limit(i64::try_from(limit)?)
            .build();
        let cursor = products.find(doc! {}, options).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_by_id(&self, id: ProductId) -> anyhow::Result<Option<Document>> {
        let products = self.provider.products().await?;
        Ok(products
            .find_one(doc! { "_id": id.object_id() }, None)
            .await?)
    }

    async fn push_review(&self, id: ProductId, review: &Review) -> anyhow::Result<u64> {
        let products = self.provider.products().await?;
        let review = review.to_bson()?;
        let result = products
            .update_one(
                doc! { "_id": id.object_id() },
                doc! { "$push": { "reviews": review } },
                None,
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.provider
            .database()
            .await?
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}
