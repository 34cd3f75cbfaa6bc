pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::{CatalogService, ReviewOutcome};
pub use domain::{NewReview, Pagination, ProductId, Review};
pub use storage::{ConnectionProvider, InMemoryProductStore, MongoProductStore, ProductStore};
