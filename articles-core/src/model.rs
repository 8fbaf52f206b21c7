//! Article record and lookup keys
//!
//! Stored documents are untyped; `Article::from_document` pulls out the
//! fields the API depends on and keeps everything else as pass-through JSON.

use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ArticleError;

/// Document field names as stored in the collection
pub mod fields {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const FORMATTED_TITLE: &str = "formattedTitle";
    pub const CATEGORY: &str = "category";
    pub const CREATED_AT: &str = "createdAt";
}

/// A single article as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    #[serde(rename = "_id", serialize_with = "serialize_hex")]
    pub id: ObjectId,
    pub title: String,
    #[serde(rename = "formattedTitle")]
    pub formatted_title: String,
    pub category: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Every other stored field, emitted unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn serialize_hex<S: Serializer>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&id.to_hex())
}

impl Article {
    pub fn new(
        id: ObjectId,
        title: impl Into<String>,
        formatted_title: impl Into<String>,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            formatted_title: formatted_title.into(),
            category: category.into(),
            created_at,
            extra: Map::new(),
        }
    }

    /// Attach a pass-through field.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an article out of a raw stored document.
    ///
    /// `createdAt` may be a BSON datetime or an RFC 3339 string.
    pub fn from_document(mut doc: Document) -> Result<Self, ArticleError> {
        let id = match doc.remove(fields::ID) {
            Some(Bson::ObjectId(id)) => id,
            Some(other) => {
                return Err(ArticleError::invalid_field(
                    "_id",
                    format!("expected ObjectId, found {:?}", other.element_type()),
                ))
            }
            None => return Err(ArticleError::MissingField { field: "_id" }),
        };

        let title = take_string(&mut doc, fields::TITLE)?;
        let formatted_title = take_string(&mut doc, fields::FORMATTED_TITLE)?;
        let category = take_string(&mut doc, fields::CATEGORY)?;
        let created_at = take_timestamp(&mut doc, fields::CREATED_AT)?;

        let extra = doc
            .into_iter()
            .map(|(key, value)| (key, value.into_relaxed_extjson()))
            .collect();

        Ok(Self {
            id,
            title,
            formatted_title,
            category,
            created_at,
            extra,
        })
    }
}

fn take_string(doc: &mut Document, field: &'static str) -> Result<String, ArticleError> {
    match doc.remove(field) {
        Some(Bson::String(value)) => Ok(value),
        Some(other) => Err(ArticleError::invalid_field(
            field,
            format!("expected string, found {:?}", other.element_type()),
        )),
        None => Err(ArticleError::MissingField { field }),
    }
}

fn take_timestamp(doc: &mut Document, field: &'static str) -> Result<DateTime<Utc>, ArticleError> {
    match doc.remove(field) {
        Some(Bson::DateTime(dt)) => DateTime::from_timestamp_millis(dt.timestamp_millis())
            .ok_or_else(|| ArticleError::invalid_field(field, "timestamp out of range")),
        Some(Bson::String(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ArticleError::invalid_field(field, e.to_string())),
        Some(other) => Err(ArticleError::invalid_field(
            field,
            format!("expected datetime, found {:?}", other.element_type()),
        )),
        None => Err(ArticleError::MissingField { field }),
    }
}

/// Public article reference: either a 24-hex identifier or a formatted title.
///
/// The raw text is always kept so an identifier-shaped reference can still
/// be tried as a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRef {
    raw: String,
    id: Option<ObjectId>,
}

impl ArticleRef {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let id = if is_object_id_hex(&raw) {
            ObjectId::parse_str(&raw).ok()
        } else {
            None
        };
        Self { raw, id }
    }

    /// Identifier form, when the text has the identifier's shape.
    pub fn id(&self) -> Option<ObjectId> {
        self.id
    }

    /// The raw reference, used for the formatted-title lookup.
    pub fn title(&self) -> &str {
        &self.raw
    }
}

fn is_object_id_hex(raw: &str) -> bool {
    raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Which articles a list query covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFilter {
    All,
    Category(String),
}

impl ArticleFilter {
    /// Query document for the store.
    pub fn to_document(&self) -> Document {
        match self {
            Self::All => Document::new(),
            Self::Category(category) => doc! { "category": category.as_str() },
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => article.category == *category,
        }
    }
}
