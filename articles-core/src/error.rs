//! Structured error types for articles-core.
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.

use thiserror::Error;

/// Configuration could not be assembled from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or empty
    #[error("{var} is not set")]
    Missing { var: &'static str },

    /// A variable is present but unusable
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// A stored document could not be read as an article.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArticleError {
    #[error("article document is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("article field '{field}' is malformed: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

impl ArticleError {
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
