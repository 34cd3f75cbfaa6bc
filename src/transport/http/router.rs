use crate::domain::review::{NewReview, Review};
use crate::transport::http::handlers::{health, products, reviews};
use crate::transport::http::types::{AppState, ErrorResponse, HealthResponse, ReviewAddedResponse};
use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Prefixes serving the read-only product routes.
pub const PRODUCT_PREFIXES: [&str; 2] = ["/api/products", "/products"];

pub const REVIEWS_ROUTE: &str = "/api/products/:id/reviews";

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::get_product_handler,
        reviews::add_review_handler
    ),
    components(schemas(
        Review,
        NewReview,
        ReviewAddedResponse,
        ErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// Route table: one set of product handlers registered under every prefix.
pub fn create_router(app_state: AppState) -> Router {
    let mut router: Router<AppState> =
        Router::new().route("/health", get(health::healthcheck_handler));

    for prefix in PRODUCT_PREFIXES {
        router = router
            .route(prefix, get(products::list_products_handler))
            .route(&format!("{prefix}/:id"), get(products::get_product_handler));
    }

    router
        .route(REVIEWS_ROUTE, post(reviews::add_review_handler))
        .with_state(app_state)
}

/// Single-origin policy: `GET`/`POST`, `Content-Type` and `Authorization` only.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("CORS origin {:?} is not a valid header value", origin))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

/// Full application: routes, OpenAPI docs, CORS and request tracing.
pub fn build_app(app_state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    Ok(create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(cors_origin)?)
        .layer(TraceLayer::new_for_http()))
}
