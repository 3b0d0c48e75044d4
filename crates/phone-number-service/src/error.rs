//! Error types for the phone number service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by registry lookups and mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Unknown customer, customer without numbers, or unknown number.
    #[error("{0}")]
    NotFound(String),

    /// The number exists but is already active. No state was changed.
    #[error("{0}")]
    AlreadyActivated(String),
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("The requested URL {0} was not found on this server.")]
    RouteNotFound(String),

    #[error("Invalid customer ID: {0}")]
    InvalidCustomerId(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::AlreadyActivated(_)) => StatusCode::CONFLICT,
            ApiError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCustomerId(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Error bodies are the bare message as text/plain.
        (self.status(), self.to_string()).into_response()
    }
}
