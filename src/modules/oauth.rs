use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::AppConfig;

const TOKEN_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: String,
}

/// Client-credentials authenticator against the identity provider
pub struct OAuthClient {
    http_client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
}

impl OAuthClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http_client: crate::utils::http::create_client_with_proxy(
                Some(TOKEN_TIMEOUT_SECS),
                Some(&config.proxy.upstream_proxy),
            ),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope.clone(),
        }
    }

    /// Request a fresh access token
    pub async fn request_token(&self) -> AppResult<TokenResponse> {
        let mut params = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        if let Some(scope) = &self.scope {
            params.push(("scope", scope.as_str()));
        }

        tracing::info!("Requesting access token from {}", self.token_url);

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::OAuth(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::OAuth(format!(
                "Token request returned {}: {}",
                status, error_text
            )));
        }

        let token_res = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::OAuth(format!("Token parsing failed: {}", e)))?;

        if token_res.access_token.is_empty() {
            return Err(AppError::OAuth(
                "Identity provider returned an empty access_token".to_string(),
            ));
        }

        tracing::info!(
            "Token request successful! Expires in: {} seconds",
            token_res.expires_in
        );
        Ok(token_res)
    }
}
