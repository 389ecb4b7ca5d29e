// Bearer token middleware for downstream calls
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::proxy::server::AppState;

/// Ensure a valid downstream token before the wrapped handler runs
///
/// On success the token is placed in request extensions for the handler to
/// pick up with `Extension<BearerToken>`. On failure the handler is skipped
/// and the error is written as a plain-text 500.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    tracing::info!("Request: {} {}", request.method(), request.uri());

    match state.token_manager.get_valid_token().await {
        Ok(token) => {
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        Err(e) => {
            tracing::error!(
                "Authentication failed, not forwarding {}: {}",
                request.uri(),
                e
            );
            e.into_response()
        }
    }
}
