pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod products;
    pub mod reviews;
}

pub use error::ApiError;
pub use router::{build_app, cors_layer, create_router, ApiDoc};
pub use types::AppState;
