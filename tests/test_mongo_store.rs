//! Runs the store and the HTTP surface against a live MongoDB.
//!
//! Requires `MONGODB_URI` (env or `.env`); every test is skipped when it is
//! unset. Each test seeds its own scratch collection and drops it afterwards.

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use product_catalog::infra::config;
use product_catalog::transport;
use product_catalog::{
    CatalogService, ConnectionProvider, MongoProductStore, NewReview, ProductId, ProductStore,
    Review,
};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

struct Scratch {
    provider: Arc<ConnectionProvider>,
    store: Arc<MongoProductStore>,
    collection: Collection<Document>,
}

impl Scratch {
    async fn drop_collection(self) {
        self.collection.drop(None).await.unwrap();
        self.provider.shutdown().await;
    }
}

/// Connects and seeds `n` products named `p0`..; `None` when no database is configured.
async fn scratch(n: usize) -> Option<Scratch> {
    config::load_dotenv();
    let uri = config::mongodb_uri();
    if uri.is_empty() {
        println!("> MONGODB_URI not set, skipping live MongoDB test");
        return None;
    }

    let provider = Arc::new(ConnectionProvider::new(
        uri,
        config::DATABASE_NAME,
        format!("{}_test_{}", config::COLLECTION_NAME, ObjectId::new().to_hex()),
    ));
    let collection = provider.products().await.unwrap();
    if n > 0 {
        let docs: Vec<Document> = (0..n)
            .map(|i| doc! { "name": format!("p{i}"), "reviews": [] })
            .collect();
        collection.insert_many(docs, None).await.unwrap();
    }

    Some(Scratch {
        store: Arc::new(MongoProductStore::new(provider.clone())),
        provider,
        collection,
    })
}

fn name_of(doc: &Document) -> String {
    doc.get_str("name").unwrap().to_string()
}

#[tokio::test]
async fn connect_twice_returns_the_same_client() {
    let Some(scratch) = scratch(0).await else { return };

    let first = scratch.provider.connect().await.unwrap();
    let second = scratch.provider.connect().await.unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(scratch.provider.is_connected());

    scratch.drop_collection().await;
}

#[tokio::test]
async fn second_page_skips_exactly_one_page_of_natural_order() {
    let Some(scratch) = scratch(5).await else { return };

    let all: Vec<String> = scratch.store.list(0, 5).await.unwrap().iter().map(name_of).collect();
    assert_eq!(all.len(), 5);

    let page: Vec<String> = scratch.store.list(2, 2).await.unwrap().iter().map(name_of).collect();
    assert_eq!(page, all[2..4]);

    let tail = scratch.store.list(4, 2).await.unwrap();
    assert_eq!(tail.len(), 1);

    scratch.drop_collection().await;
}

#[tokio::test]
async fn find_and_push_match_by_object_id() {
    let Some(scratch) = scratch(2).await else { return };

    let missing = ProductId::new(ObjectId::new());
    assert!(scratch.store.find_by_id(missing).await.unwrap().is_none());
    let review = Review::new(NewReview::default(), Utc::now());
    assert_eq!(scratch.store.push_review(missing, &review).await.unwrap(), 0);

    let first = scratch.store.list(0, 1).await.unwrap().remove(0);
    let id = ProductId::new(first.get_object_id("_id").unwrap());
    assert_eq!(scratch.store.push_review(id, &review).await.unwrap(), 1);

    let stored = scratch.store.find_by_id(id).await.unwrap().unwrap();
    let reviews = stored.get_array("reviews").unwrap();
    assert_eq!(reviews.len(), 1);
    let stored_review = reviews[0].as_document().unwrap();
    assert_eq!(stored_review.get_str("id").unwrap(), review.id);
    assert_eq!(stored_review.get_str("rating").unwrap(), "0");

    scratch.store.ping().await.unwrap();
    scratch.drop_collection().await;
}

#[tokio::test]
async fn http_contract_holds_against_mongodb() {
    let Some(scratch) = scratch(5).await else { return };

    let app_state = transport::http::AppState::new(CatalogService::new(scratch.store.clone()));
    let router = transport::http::build_app(app_state, config::DEFAULT_CORS_ORIGIN).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let base_url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    let all: Vec<JsonValue> = client
        .get(format!("{}/api/products?limit=5", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let page: Vec<JsonValue> = client
        .get(format!("{}/api/products?page=2&limit=2", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page, all[2..4]);

    let missing = client
        .get(format!("{}/api/products/{}", base_url, ObjectId::new().to_hex()))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let missing_review = client
        .post(format!("{}/api/products/{}/reviews", base_url, ObjectId::new().to_hex()))
        .json(&json!({ "comment": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_review.status(), reqwest::StatusCode::NOT_FOUND);

    let id = all[0]["_id"].as_str().unwrap();
    let reviews_url = format!("{}/api/products/{}/reviews", base_url, id);

    let added: JsonValue = client
        .post(&reviews_url)
        .json(&json!({ "comment": "Tastes like summer" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let product: JsonValue = client
        .get(format!("{}/api/products/{}", base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product["_id"], id);
    assert_eq!(product["reviews"], json!([added["review"]]));

    let (a, b) = tokio::join!(
        client.post(&reviews_url).json(&json!({ "name": "a" })).send(),
        client.post(&reviews_url).json(&json!({ "name": "b" })).send(),
    );
    assert_eq!(a.unwrap().status(), reqwest::StatusCode::OK);
    assert_eq!(b.unwrap().status(), reqwest::StatusCode::OK);

    let product: JsonValue = client
        .get(format!("{}/api/products/{}", base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let reviews = product["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    let mut names: Vec<&str> = reviews[1..].iter().map(|r| r["name"].as_str().unwrap()).collect();
    names.sort_unstable();
    assert_eq!(names, ["a", "b"]);

    scratch.drop_collection().await;
}
