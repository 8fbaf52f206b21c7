//! Article endpoints
//!
//! - GET /api/articles                              newest first, paginated
//! - GET /api/articles/category/{category}          same, filtered by category
//! - GET /api/articles/title/{formattedTitle}       single article by slug
//! - GET /api/articles/{id}                         identifier, then slug

use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router};

use articles_core::{Article, ArticleFilter, ArticleRef};

use super::get_only;
use crate::http::error::ApiError;
use crate::http::extractors::{ArticleSegment, CategorySegment, PageQuery};
use crate::http::server::AppState;

const ARTICLE_NOT_FOUND: &str = "Article not found";

/// GET /api/articles
async fn list_articles(
    State(state): State<Arc<AppState>>,
    PageQuery(page): PageQuery,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state
        .store
        .list(&ArticleFilter::All, page)
        .await
        .map_err(state.backend_error("Failed to fetch articles"))?;

    Ok(Json(articles))
}

/// GET /api/articles/category/{category}
async fn list_by_category(
    State(state): State<Arc<AppState>>,
    CategorySegment(category): CategorySegment,
    PageQuery(page): PageQuery,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state
        .store
        .list(&ArticleFilter::Category(category), page)
        .await
        .map_err(state.backend_error("Failed to fetch articles by category"))?;

    Ok(Json(articles))
}

/// GET /api/articles/category with no category segment
async fn category_required() -> ApiError {
    ApiError::BadRequest("Category is required")
}

/// GET /api/articles/title/{formattedTitle}
async fn get_by_formatted_title(
    State(state): State<Arc<AppState>>,
    ArticleSegment(formatted_title): ArticleSegment,
) -> Result<Json<Article>, ApiError> {
    if formatted_title.is_empty() {
        return Err(ApiError::BadRequest("Formatted title is required"));
    }

    state
        .store
        .find_by_formatted_title(&formatted_title)
        .await
        .map_err(state.backend_error("Failed to fetch article"))?
        .map(Json)
        .ok_or(ApiError::NotFound(ARTICLE_NOT_FOUND))
}

/// GET /api/articles/title with no title segment
async fn formatted_title_required() -> ApiError {
    ApiError::BadRequest("Formatted title is required")
}

/// GET /api/articles/{id} - identifier first, then formatted title
async fn get_by_reference(
    State(state): State<Arc<AppState>>,
    ArticleSegment(id): ArticleSegment,
) -> Result<Json<Article>, ApiError> {
    let reference = ArticleRef::parse(id);

    state
        .store
        .resolve(&reference)
        .await
        .map_err(state.backend_error("Failed to fetch article"))?
        .map(Json)
        .ok_or(ApiError::NotFound(ARTICLE_NOT_FOUND))
}

/// Article routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/articles", get_only(list_articles))
        .route("/api/articles/category", get_only(category_required))
        .route("/api/articles/category/", get_only(category_required))
        .route("/api/articles/category/{category}", get_only(list_by_category))
        .route("/api/articles/title", get_only(formatted_title_required))
        .route("/api/articles/title/", get_only(formatted_title_required))
        .route("/api/articles/title/{formatted_title}", get_only(get_by_formatted_title))
        .route("/api/articles/{id}", get_only(get_by_reference))
}
