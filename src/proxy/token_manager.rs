use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};

use crate::error::{AppError, AppResult};
use crate::models::{AppConfig, BearerToken};
use crate::modules::oauth::OAuthClient;

/// Shared bearer token with lazy, single-flight refresh
pub struct TokenManager {
    authenticator: OAuthClient,
    token: RwLock<Option<BearerToken>>,
    refresh_lock: Mutex<()>,
    refresh_skew_secs: i64,
    refresh_count: AtomicUsize,
}

impl TokenManager {
    /// Create new TokenManager
    pub fn new(config: &AppConfig) -> Self {
        Self {
            authenticator: OAuthClient::new(config),
            token: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            refresh_skew_secs: config.token_refresh_skew_secs,
            refresh_count: AtomicUsize::new(0),
        }
    }

    /// Return a token that is valid beyond the refresh window, refreshing if needed
    pub async fn get_valid_token(&self) -> AppResult<BearerToken> {
        if let Some(token) = self.current_fresh().await {
            return Ok(token);
        }

        // Only one caller refreshes; the rest wait here and pick up its result.
        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.current_fresh().await {
            return Ok(token);
        }

        match self.token.read().await.as_ref() {
            Some(stale) => tracing::info!(
                "Token {} expires at {}, refreshing...",
                stale.redacted(),
                stale.expires_at
            ),
            None => tracing::info!("No token yet, authenticating..."),
        }
        self.refresh().await
    }

    /// Unconditionally fetch a new token and store it
    pub async fn refresh(&self) -> AppResult<BearerToken> {
        self.refresh_count.fetch_add(1, Ordering::SeqCst);

        let issued_at = chrono::Utc::now();
        let response = match self.authenticator.request_token().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("Token refresh failed: {}", e);
                return Err(e);
            }
        };

        let expires_in = response.expires_in;
        let token = BearerToken::new(response.access_token, expires_in, issued_at).ok_or_else(|| {
            let e = AppError::OAuth(format!("Token expires_in out of range: {}", expires_in));
            tracing::error!("Token refresh failed: {}", e);
            e
        })?;
        *self.token.write().await = Some(token.clone());

        tracing::info!(
            "Token refreshed successfully! {} valid until {}",
            token.redacted(),
            token.expires_at
        );
        Ok(token)
    }

    /// Number of authentication calls made so far
    pub fn refresh_count(&self) -> usize {
        self.refresh_count.load(Ordering::SeqCst)
    }

    async fn current_fresh(&self) -> Option<BearerToken> {
        let now = chrono::Utc::now();
        self.token
            .read()
            .await
            .as_ref()
            .filter(|t| !t.is_stale(now, self.refresh_skew_secs))
            .cloned()
    }

    #[cfg(test)]
    pub(crate) async fn set_token(&self, token: BearerToken) {
        *self.token.write().await = Some(token);
    }
}
