//! Centralized configuration (environment variables + defaults).

use anyhow::Context;

/// Database holding the catalog.
pub const DATABASE_NAME: &str = "honey";

/// Collection holding product documents (reviews are embedded).
pub const COLLECTION_NAME: &str = "allproducts";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Loads `.env` into the process environment if present.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// MongoDB connection string.
///
/// Not validated here: a missing or malformed URI is reported by the driver
/// when the connection is first established.
pub fn mongodb_uri() -> String {
    std::env::var("MONGODB_URI").unwrap_or_default()
}

/// Listening port (`PORT`, defaults to 3000).
pub fn port() -> anyhow::Result<u16> {
    match std::env::var("PORT") {
        Ok(v) => v
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got {:?}", v)),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// The single origin allowed by the CORS policy.
pub fn cors_origin() -> String {
    std::env::var("CORS_ORIGIN")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
}
