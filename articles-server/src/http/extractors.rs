//! Custom Axum extractors
//!
//! Rejections become `ApiError`s so every failure keeps the JSON body.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;

use articles_core::{Pagination, PaginationParams};

use super::error::ApiError;

/// Pagination from the query string. Never rejects: repeated keys keep
/// the first value and anything unparseable falls back to defaults.
pub struct PageQuery(pub Pagination);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let params = PaginationParams::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(Self(Pagination::from(params)))
    }
}

/// Category path segment; an undecodable segment is a missing category.
pub struct CategorySegment(pub String);

impl<S> FromRequestParts<S> for CategorySegment
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(category): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest("Category is required"))?;

        if category.trim().is_empty() {
            return Err(ApiError::BadRequest("Category is required"));
        }
        Ok(Self(category))
    }
}

/// Identifier or formatted-title segment. No article can match a segment
/// that does not decode to UTF-8, so that is a 404.
pub struct ArticleSegment(pub String);

impl<S> FromRequestParts<S> for ArticleSegment
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound("Article not found"))?;

        Ok(Self(segment))
    }
}
