use crate::app::catalog_service::ReviewOutcome;
use crate::domain::NewReview;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::products::parse_product_id;
use crate::transport::http::types::{AppState, ErrorResponse, ReviewAddedResponse};
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header;
use axum::{Form, Json};

/// Review fields from either a JSON or a URL-encoded form body.
///
/// A missing body, or one with any other content type, yields all defaults.
pub struct ReviewPayload(pub NewReview);

#[async_trait]
impl<S> FromRequest<S> for ReviewPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::Rejected {
                    status: e.status(),
                    message: format!("Invalid JSON body: {}", e.body_text()),
                })?;
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self(NewReview::default()));
            }
            let input = serde_json::from_slice(&body)
                .map_err(|e| ApiError::InvalidBody(format!("Invalid JSON body: {}", e)))?;
            return Ok(Self(input));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(input) = Form::<NewReview>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Rejected {
                    status: e.status(),
                    message: format!("Invalid form body: {}", e.body_text()),
                })?;
            return Ok(Self(input));
        }

        Ok(Self(NewReview::default()))
    }
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    params(
        ("id" = String, Path, description = "Product id (24-character hex)")
    ),
    request_body = NewReview,
    responses(
        (status = 200, description = "Review appended", body = ReviewAddedResponse),
        (status = 400, description = "Invalid ID format", body = ErrorResponse),
        (status = 404, description = "Product not found or not updated", body = ErrorResponse),
        (status = 413, description = "Body exceeds the size limit", body = ErrorResponse),
        (status = 422, description = "Unparsable body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn add_review_handler(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<ReviewPayload, ApiError>,
) -> Result<Json<ReviewAddedResponse>, ApiError> {
    // The id is checked before the body so a bad id always reports 400.
    let Path(id) = id?;
    let id = parse_product_id(&id)?;
    let ReviewPayload(input) = payload?;

    match state.catalog.add_review(id, input).await {
        Ok(ReviewOutcome::Added(review)) => Ok(Json(ReviewAddedResponse {
            message: "Review added successfully".to_string(),
            review,
        })),
        Ok(ReviewOutcome::NotModified) => Err(ApiError::NotFound("Product not found or not updated")),
        Err(e) => Err(ApiError::Internal(e)),
    }
}
