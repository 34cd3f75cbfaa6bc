//! Product identifiers and the document → JSON shaping applied to every
//! product returned to clients.

use chrono::SecondsFormat;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an ObjectId in its canonical hex encoding.
const OBJECT_ID_HEX_LEN: usize = 24;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid product id {0:?}: expected a 24-character hex string")]
pub struct InvalidProductId(pub String);

/// Database-assigned product identifier (a 12-byte ObjectId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(ObjectId);

impl ProductId {
    pub fn new(oid: ObjectId) -> Self {
        Self(oid)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.len() != OBJECT_ID_HEX_LEN {
            return Err(InvalidProductId(raw.to_string()));
        }
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| InvalidProductId(raw.to_string()))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<ObjectId> for ProductId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

/// Renders a stored document as client JSON.
///
/// ObjectIds (including the top-level `_id`) become hex strings and BSON dates
/// become RFC 3339 strings; everything else uses relaxed Extended JSON.
pub fn document_to_json(doc: Document) -> JsonValue {
    JsonValue::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn bson_to_json(value: Bson) -> JsonValue {
    match value {
        Bson::ObjectId(oid) => JsonValue::String(oid.to_hex()),
        Bson::DateTime(dt) => {
            JsonValue::String(dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => JsonValue::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
