//! API description and liveness endpoints

use axum::{Json, Router};
use serde::Serialize;

use super::get_only;

/// One documented endpoint
#[derive(Debug, Serialize)]
pub struct EndpointDoc {
    pub path: &'static str,
    pub method: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
}

/// GET / and GET /api
#[derive(Debug, Serialize)]
pub struct ApiDescription {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<EndpointDoc>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

fn endpoints() -> Vec<EndpointDoc> {
    vec![
        EndpointDoc {
            path: "/api/articles",
            method: "GET",
            description: "Get all articles (query: page, limit)",
            example: Some("/api/articles?page=2&limit=10"),
        },
        EndpointDoc {
            path: "/api/articles/category/{category}",
            method: "GET",
            description: "Get articles by category (query: page, limit)",
            example: Some("/api/articles/category/Artificial Intelligence"),
        },
        EndpointDoc {
            path: "/api/articles/title/{formattedTitle}",
            method: "GET",
            description: "Get article by formatted title",
            example: Some("/api/articles/title/the-future-of-ai-development"),
        },
        EndpointDoc {
            path: "/api/articles/{id}",
            method: "GET",
            description: "Get article by ID or formatted title",
            example: Some("/api/articles/65ab1c2f3e4d5f6a7b8c9d0e"),
        },
        EndpointDoc {
            path: "/api/debug-db",
            method: "GET",
            description: "Database connection diagnostics",
            example: None,
        },
    ]
}

async fn describe() -> Json<ApiDescription> {
    Json(ApiDescription {
        message: "Articles API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: endpoints(),
    })
}

/// GET /health - does not touch the database
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Index routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get_only(describe))
        .route("/api", get_only(describe))
        .route("/health", get_only(health))
}
