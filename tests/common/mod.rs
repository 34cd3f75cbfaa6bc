//! Shared harness: runs the real application over an in-memory store.

#![allow(dead_code)]

use mongodb::bson::{doc, Document};
use product_catalog::transport;
use product_catalog::{CatalogService, InMemoryProductStore};
use std::sync::Arc;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<InMemoryProductStore>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Documents named `p0`..`p{n-1}`, each with an empty review list.
pub fn products(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| doc! { "name": format!("p{i}"), "price": (i as f64) + 0.5, "reviews": [] })
        .collect()
}

/// Binds to an ephemeral port to avoid conflicts with a running server.
pub async fn spawn_app(docs: Vec<Document>) -> TestApp {
    let store = Arc::new(InMemoryProductStore::with_products(docs));
    let app_state = transport::http::AppState::new(CatalogService::new(store.clone()));
    let router = transport::http::build_app(app_state, TEST_ORIGIN).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        store,
    }
}
