//! API error type with IntoResponse
//!
//! Every error renders as `{ "error": <summary>, "details"?: <message> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing or blank required parameter (400)
    BadRequest(&'static str),

    /// No matching document or route (404)
    NotFound(&'static str),

    /// Wrong HTTP verb (405)
    MethodNotAllowed,

    /// Connection, query or data failure (500, logged)
    Backend {
        summary: &'static str,
        details: Option<String>,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    /// Wrap a store failure. The underlying message is always logged and
    /// only returned to the client when `expose_details` is set.
    pub fn backend(summary: &'static str, err: StoreError, expose_details: bool) -> Self {
        tracing::error!(error = %err, "{}", summary);
        Self::Backend {
            summary,
            details: expose_details.then(|| err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::BadRequest(msg) | Self::NotFound(msg) => ErrorBody {
                error: msg,
                details: None,
            },
            Self::MethodNotAllowed => ErrorBody {
                error: "Method not allowed",
                details: None,
            },
            Self::Backend { summary, details } => ErrorBody {
                error: summary,
                details: details.as_deref(),
            },
        };

        (status, Json(body)).into_response()
    }
}
