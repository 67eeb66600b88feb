//! Server error types.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::view::render::escape_html;

/// Server error type.
///
/// Recoverable failures are attached to the re-rendered page instead; this
/// type covers requests for which no page can be produced.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServerError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = %status, error = %self, "Request rejected");

        let body = format!(
            "<!DOCTYPE html><html><head><title>{code}</title></head>\
             <body><h1>{code}</h1><p>{message}</p><a href=\"/\">Back</a></body></html>",
            code = status,
            message = escape_html(&self.to_string()),
        );

        (status, Html(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
