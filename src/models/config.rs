use crate::proxy::ProxyConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration, read once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Downstream API host, e.g. `https://api.example-broker.com`
    pub api_host: String,
    /// OAuth token endpoint of the identity provider
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scope: Option<String>,
    /// Tokens expiring within this many seconds are refreshed early
    #[serde(default = "default_refresh_skew")]
    pub token_refresh_skew_secs: i64,
    /// Rolling log file directory; console only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

fn default_refresh_skew() -> i64 {
    60
}

impl AppConfig {
    /// Minimal config pointing at the given hosts, with empty credentials
    pub fn new(api_host: &str, token_url: &str) -> Self {
        Self {
            api_host: api_host.to_string(),
            token_url: token_url.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            scope: None,
            token_refresh_skew_secs: default_refresh_skew(),
            log_dir: None,
            proxy: ProxyConfig::default(),
        }
    }
}
