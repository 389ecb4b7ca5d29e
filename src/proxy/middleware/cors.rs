// CORS preflight responder
use axum::{
    body::Body,
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
};

const API_PREFIX: &str = "/api/";

/// Answer OPTIONS for any `/api/*` path, whether or not a route exists
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS && request.uri().path().starts_with(API_PREFIX) {
        tracing::debug!("Preflight: {}", request.uri());
        return preflight_response();
    }
    next.run(request).await
}

fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::HeaderValue::from_static("*"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        header::HeaderValue::from_static("Content-Type"),
    );
    response
}
