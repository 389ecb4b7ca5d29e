use crate::proxy::config::UpstreamProxyConfig;
use reqwest::{Client, Proxy};

/// Create an HTTP client with the outbound proxy applied
///
/// `timeout_secs = None` keeps the transport default (no overall timeout).
pub fn create_client_with_proxy(
    timeout_secs: Option<u64>,
    proxy_config: Option<&UpstreamProxyConfig>,
) -> Client {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }

    if let Some(config) = proxy_config {
        if config.enabled && !config.url.is_empty() {
            match Proxy::all(&config.url) {
                Ok(proxy) => {
                    builder = builder.proxy(proxy);
                    tracing::info!("HTTP client upstream proxy enabled: {}", config.url);
                }
                Err(e) => {
                    tracing::error!("Invalid proxy address: {}, error: {}", config.url, e);
                }
            }
        }
    }

    builder.build().unwrap_or_else(|_| Client::new())
}
