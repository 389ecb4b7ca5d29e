// Success side of the response mapping rule
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Upstream JSON written back verbatim with CORS enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPassthrough(pub String);

impl IntoResponse for JsonPassthrough {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::CONTENT_TYPE, "application/json"),
            ],
            self.0,
        )
            .into_response()
    }
}
