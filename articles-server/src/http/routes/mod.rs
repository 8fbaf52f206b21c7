//! Route handlers organized by resource
//!
//! Every route is GET-only; other verbs, HEAD included, get a JSON 405.

use axum::handler::Handler;
use axum::routing::{get, MethodRouter};

use super::error::ApiError;

pub mod articles;
pub mod debug;
pub mod index;

/// GET route whose other verbs answer 405 with a JSON body
pub(crate) fn get_only<H, T, S>(handler: H) -> MethodRouter<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    get(handler).head(method_not_allowed).fallback(method_not_allowed)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for unknown paths
pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound("Not found")
}
