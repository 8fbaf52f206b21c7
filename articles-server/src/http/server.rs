//! Axum server setup
//!
//! - Open CORS for cross-origin GET with `Content-Type`
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use articles_core::{mask_uri, Environment};

use super::error::ApiError;
use super::routes;
use crate::db::{ArticleStore, StoreError};

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub environment: Environment,
    /// Connection string with the password masked, for diagnostics
    pub masked_uri: String,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>, environment: Environment) -> Self {
        Self {
            store,
            environment,
            masked_uri: "Not set".to_string(),
        }
    }

    pub fn with_uri(mut self, uri: &str) -> Self {
        self.masked_uri = mask_uri(uri);
        self
    }

    /// Converts a store failure into a 500 with the given summary.
    /// Production hides the underlying message from clients.
    pub fn backend_error(&self, summary: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        let expose_details = !self.environment.is_production();
        move |err| ApiError::backend(summary, err, expose_details)
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .merge(routes::index::router())
        .merge(routes::articles::router())
        .merge(routes::debug::router())
        .fallback(routes::not_found)
        // Non-preflight responses carry the allowed verb and header too
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(state: AppState, bind_addr: SocketAddr) -> Result<(), ServerError> {
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
