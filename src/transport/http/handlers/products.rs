use crate::domain::{Pagination, ProductId};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, ErrorResponse, ListProductsQuery};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value as JsonValue;

/// Parses a path id, rejecting anything that is not a canonical ObjectId.
pub fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Page of products (`_id` as hex string)"),
        (status = 400, description = "Invalid or duplicated page/limit", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let Query(query) = query?;
    let page = Pagination::from_query(query.page.as_deref(), query.limit.as_deref())?;
    let products = state
        .catalog
        .list_products(page)
        .await
        .map_err(ApiError::ListFailed)?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (24-character hex)")
    ),
    responses(
        (status = 200, description = "The product, reviews included"),
        (status = 400, description = "Invalid ID format", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<JsonValue>, ApiError> {
    let Path(id) = id?;
    let id = parse_product_id(&id)?;
    match state.catalog.get_product(id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(ApiError::NotFound("Product not found")),
        Err(e) => Err(ApiError::Internal(e)),
    }
}
