//! In-memory product store.
//!
//! Keeps documents in insertion order, which stands in for the database's
//! natural order. Every trait call is counted so callers can assert that a
//! request never reached the store.

use crate::domain::{ProductId, Review};
use crate::storage::ProductStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Document>>,
    calls: AtomicUsize,
}

fn id_of(doc: &Document) -> Option<ObjectId> {
    doc.get_object_id("_id").ok()
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store; documents without an `_id` get a fresh ObjectId.
    pub fn with_products(docs: impl IntoIterator<Item = Document>) -> Self {
        let products = docs
            .into_iter()
            .map(|mut doc| {
                if id_of(&doc).is_none() {
                    doc.insert("_id", ObjectId::new());
                }
                doc
            })
            .collect();
        Self {
            products: RwLock::new(products),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn insert(&self, mut doc: Document) -> ProductId {
        let oid = match id_of(&doc) {
            Some(oid) => oid,
            None => {
                let oid = ObjectId::new();
                doc.insert("_id", oid);
                oid
            }
        };
        self.products.write().await.push(doc);
        ProductId::new(oid)
    }

    /// Ids of every stored product, in natural order.
    pub async fn ids(&self) -> Vec<ProductId> {
        self.products
            .read()
            .await
            .iter()
            .filter_map(id_of)
            .map(ProductId::new)
            .collect()
    }

    /// Number of [`ProductStore`] calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self, skip: u64, limit: u64) -> anyhow::Result<Vec<Document>> {
        self.record_call();
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let products = self.products.read().await;
        Ok(products.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> anyhow::Result<Option<Document>> {
        self.record_call();
        let products = self.products.read().await;
        Ok(products
            .iter()
            .find(|doc| id_of(doc) == Some(id.object_id()))
            .cloned())
    }

    async fn push_review(&self, id: ProductId, review: &Review) -> anyhow::Result<u64> {
        self.record_call();
        let review = review.to_bson()?;
        let mut products = self.products.write().await;
        let Some(doc) = products
            .iter_mut()
            .find(|doc| id_of(doc) == Some(id.object_id()))
        else {
            return Ok(0);
        };
        match doc.get_mut("reviews") {
            Some(Bson::Array(reviews)) => reviews.push(review),
            None => {
                doc.insert("reviews", vec![review]);
            }
            Some(other) => {
                anyhow::bail!(
                    "cannot push review onto non-array `reviews` field of type {:?}",
                    other.element_type()
                );
            }
        }
        Ok(1)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.record_call();
        Ok(())
    }
}
