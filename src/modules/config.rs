use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::AppConfig;

const CONFIG_FILE: &str = "trader.conf";
const CONFIG_ENV: &str = "TRADE_GATEWAY_CONFIG";
const MAX_REFRESH_SKEW_SECS: i64 = 24 * 60 * 60;

/// Pick the config path: explicit argument, then environment, then `trader.conf`
pub fn resolve_config_path(arg: Option<String>) -> PathBuf {
    let given = |p: &String| !p.trim().is_empty();
    arg.filter(given)
        .or_else(|| std::env::var(CONFIG_ENV).ok().filter(given))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Load application config
pub fn load_app_config(path: &Path) -> AppResult<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;

    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> AppResult<()> {
    for (name, value) in [("api_host", &config.api_host), ("token_url", &config.token_url)] {
        let parsed = url::Url::parse(value)
            .map_err(|e| AppError::Config(format!("Invalid {} {:?}: {}", name, value, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "{} must be an absolute URL: {:?}",
                name, value
            )));
        }
    }
    if config.client_id.is_empty() {
        return Err(AppError::Config("client_id must not be empty".to_string()));
    }
    if !(0..=MAX_REFRESH_SKEW_SECS).contains(&config.token_refresh_skew_secs) {
        return Err(AppError::Config(format!(
            "token_refresh_skew_secs must be between 0 and {}, got {}",
            MAX_REFRESH_SKEW_SECS, config.token_refresh_skew_secs
        )));
    }
    Ok(())
}
