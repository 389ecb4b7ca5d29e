use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {status}: {body}")]
    Upstream {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Request body error: {0}")]
    Body(String),

    #[error("Route error: {0}")]
    Route(String),
}

// Every per-request failure becomes a plain-text 500 without CORS or JSON headers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

// Implement alias for Result to simplify usage
pub type AppResult<T> = Result<T, AppError>;
