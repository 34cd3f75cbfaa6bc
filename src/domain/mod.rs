//! Catalog domain types: product ids, reviews and pagination.

pub mod pagination;
pub mod product;
pub mod review;

pub use pagination::{Pagination, PaginationError};
pub use product::{document_to_json, InvalidProductId, ProductId};
pub use review::{NewReview, RatingInput, Review};
