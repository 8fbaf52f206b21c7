//! Database diagnostics endpoint
//!
//! GET /api/debug-db - collections, article count and a sample document,
//! for checking a deployment is pointed at the right database.

use std::sync::Arc;

use axum::extract::State;
use axum::{Json, Router};
use serde::Serialize;

use super::get_only;
use crate::db::SampleArticle;
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Sample {
    Article(SampleArticle),
    Missing(&'static str),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub database_name: String,
    pub environment: &'static str,
    pub mongo_uri_masked: String,
    pub collections: Vec<String>,
    pub articles_count: u64,
    pub sample_article: Sample,
}

async fn debug_db(State(state): State<Arc<AppState>>) -> Result<Json<DebugReport>, ApiError> {
    let diagnostics = state
        .store
        .diagnostics()
        .await
        .map_err(state.backend_error("Database connection error"))?;

    Ok(Json(DebugReport {
        database_name: diagnostics.database_name,
        environment: state.environment.as_str(),
        mongo_uri_masked: state.masked_uri.clone(),
        collections: diagnostics.collections,
        articles_count: diagnostics.articles_count,
        sample_article: diagnostics
            .sample_article
            .map(Sample::Article)
            .unwrap_or(Sample::Missing("No articles found")),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/debug-db", get_only(debug_db))
}
