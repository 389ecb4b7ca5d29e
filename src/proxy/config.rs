use serde::Deserialize;

/// Gateway listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Whether LAN access is allowed
    /// - false: local access only on 127.0.0.1 (default)
    /// - true: listen on 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest inbound request body forwarded upstream (bytes)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Outbound proxy configuration
    #[serde(default)]
    pub upstream_proxy: UpstreamProxyConfig,
}

/// Outbound proxy configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpstreamProxyConfig {
    /// Whether enabled
    pub enabled: bool,
    /// Proxy address (http://, https://, socks5://)
    pub url: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            allow_lan_access: false,
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            upstream_proxy: UpstreamProxyConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    1234
}

fn default_max_body_bytes() -> usize {
    100 * 1024 * 1024
}

impl ProxyConfig {
    /// Get the actual listening address
    pub fn get_bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: ProxyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port, 1234);
        assert_eq!(config.get_bind_address(), "127.0.0.1");
        assert_eq!(config.max_body_bytes, 100 * 1024 * 1024);
        assert!(!config.upstream_proxy.enabled);
    }

    #[test]
    fn test_lan_access_binds_all_interfaces() {
        let config = ProxyConfig {
            allow_lan_access: true,
            ..ProxyConfig::default()
        };
        assert_eq!(config.get_bind_address(), "0.0.0.0");
    }
}
