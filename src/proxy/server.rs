use crate::error::{AppError, AppResult};
use crate::models::AppConfig;
use crate::proxy::routes::ROUTES;
use crate::proxy::upstream::UpstreamClient;
use crate::proxy::TokenManager;
use axum::{
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Axum application state
#[derive(Clone)]
pub struct AppState {
    pub token_manager: Arc<TokenManager>,
    pub upstream: Arc<UpstreamClient>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            token_manager: Arc::new(TokenManager::new(config)),
            upstream: Arc::new(UpstreamClient::new(
                &config.api_host,
                Some(&config.proxy.upstream_proxy),
            )?),
            max_body_bytes: config.proxy.max_body_bytes,
        })
    }
}

/// Build the full gateway router
pub fn build_router(state: AppState) -> Router {
    use crate::proxy::handlers;
    use crate::proxy::middleware::{auth_middleware, preflight_middleware};

    // Token-protected routes, one per table entry
    let mut protected = Router::new();
    for entry in ROUTES {
        protected = protected.route(entry.local_path, handlers::forward::route_for(entry));
    }
    // route_layer so unmatched paths stay a plain 404 without authenticating
    let protected = protected.route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    Router::new()
        .route("/api/users/:userID", get(handlers::users::handle_get_user))
        .route("/healthz", get(health_check_handler))
        .merge(protected)
        .layer(axum::middleware::from_fn(preflight_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(
        host: &str,
        port: u16,
        state: AppState,
    ) -> AppResult<(Self, tokio::task::JoinHandle<()>)> {
        let app = build_router(state);

        // Bind address
        let addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to bind address {}: {}", addr, e),
            ))
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Trade gateway started at http://{}", local_addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
            local_addr,
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Trade gateway stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}
