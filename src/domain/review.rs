//! Customer reviews embedded in product documents.

use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_RATING: &str = "0";

/// A review as stored in a product's `reviews` array and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// Generated on insertion (ObjectId hex).
    pub id: String,
    pub name: String,
    pub city: String,
    pub comment: String,
    /// Free-form text; not validated as a number.
    pub rating: String,
    pub title: String,
    /// Insertion time, ISO-8601 UTC with milliseconds.
    pub date: String,
}

/// Caller-supplied review fields. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NewReview {
    pub name: Option<String>,
    pub city: Option<String>,
    pub comment: Option<String>,
    #[schema(value_type = Option<String>)]
    pub rating: Option<RatingInput>,
    pub title: Option<String>,
}

/// Ratings arrive as text (forms, most clients) or as bare JSON numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Text(String),
    Number(serde_json::Number),
}

impl RatingInput {
    fn into_text(self) -> String {
        match self {
            RatingInput::Text(s) => s,
            RatingInput::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for RatingInput {
    fn from(s: &str) -> Self {
        RatingInput::Text(s.to_string())
    }
}

fn text_or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Review {
    /// Builds a review with a fresh id, stamped with `now`.
    pub fn new(input: NewReview, now: DateTime<Utc>) -> Self {
        Self::with_id(ObjectId::new().to_hex(), input, now)
    }

    pub fn with_id(id: String, input: NewReview, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: text_or_default(input.name, ""),
            city: text_or_default(input.city, ""),
            comment: text_or_default(input.comment, ""),
            rating: text_or_default(input.rating.map(RatingInput::into_text), DEFAULT_RATING),
            title: text_or_default(input.title, ""),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn to_bson(&self) -> anyhow::Result<Bson> {
        Ok(mongodb::bson::to_bson(self)?)
    }
}
