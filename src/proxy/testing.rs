// Loopback stubs for the identity provider and the downstream API
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::models::AppConfig;

/// Serve `app` on an ephemeral loopback port
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Identity provider issuing `tok-<n>`; returns the token URL
pub async fn spawn_identity(expires_in: i64, calls: Arc<AtomicUsize>) -> String {
    let app = Router::new().route(
        "/token",
        post(move || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                // Widen the race window for concurrency tests.
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                Json(serde_json::json!({
                    "access_token": format!("tok-{}", n),
                    "expires_in": expires_in,
                    "token_type": "Bearer"
                }))
            }
        }),
    );
    format!("http://{}/token", spawn(app).await)
}

/// Identity provider issuing a single fixed token with the given lifetime
pub async fn spawn_identity_with_lifetime(expires_in: i64) -> String {
    let app = Router::new().route(
        "/token",
        post(move || async move {
            Json(serde_json::json!({ "access_token": "t", "expires_in": expires_in }))
        }),
    );
    format!("http://{}/token", spawn(app).await)
}

/// Identity provider that always answers with `status`
pub async fn spawn_failing_identity(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/token", post(move || async move { (status, body) }));
    format!("http://{}/token", spawn(app).await)
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Downstream API recording every call
///
/// Paths containing `missing` answer 404, everything else answers
/// `UPSTREAM_BODY`.
pub async fn spawn_upstream(log: Arc<Mutex<Vec<Recorded>>>) -> String {
    let app = Router::new().fallback(
        move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
            let log = log.clone();
            async move {
                let header_str = |name: header::HeaderName| {
                    headers
                        .get(name)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string)
                };
                let missing = uri.path().contains("missing");
                log.lock().unwrap().push(Recorded {
                    method,
                    uri: uri.to_string(),
                    authorization: header_str(header::AUTHORIZATION),
                    content_type: header_str(header::CONTENT_TYPE),
                    body,
                });
                if missing {
                    (StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).into_response()
                } else {
                    (StatusCode::OK, UPSTREAM_BODY).into_response()
                }
            }
        },
    );
    format!("http://{}", spawn(app).await)
}

/// Body with irregular spacing so any re-encoding would be visible
pub const UPSTREAM_BODY: &str = "{\"id\": \"42\",  \"balance\":1e3 , \"tags\":[]}";

pub fn gateway_config(api_host: &str, token_url: &str) -> AppConfig {
    let mut config = AppConfig::new(api_host, token_url);
    config.client_id = "gateway".to_string();
    config.client_secret = "s3cret".to_string();
    config
}
