//! Request error taxonomy and HTTP mapping.
//!
//! Validation errors are terminal for the request and reported precisely to
//! the caller as plain text. Anything unexpected becomes a generic 500; the
//! detail goes to the log, never to the client. Tracker failures do not
//! appear here at all: they are swallowed inside the notifier.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Errors a request handler can surface to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No `dest` query parameter (or blank) → 400.
    #[error("Missing dest parameter")]
    MissingDest,

    /// `dest` failed normalization (unparseable or disallowed scheme) → 400.
    #[error("Invalid dest URL")]
    InvalidDest,

    /// Normalized destination host rejected by the allow-list → 403.
    #[error("Destination domain not allowed")]
    DomainNotAllowed,

    /// Any other unexpected failure → 500 with a generic body.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MissingDest => (StatusCode::BAD_REQUEST, "Missing dest parameter"),
            AppError::InvalidDest => (StatusCode::BAD_REQUEST, "Invalid dest URL"),
            AppError::DomainNotAllowed => {
                (StatusCode::FORBIDDEN, "Destination domain not allowed")
            }
            AppError::Internal(e) => {
                error!("Internal error handling redirect: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, body).into_response()
    }
}
