// Upstream client implementation
// Pass-through calls to the downstream trading API

use bytes::Bytes;
use reqwest::{header, Client, Method};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::proxy::config::UpstreamProxyConfig;
use crate::proxy::routes::{RemotePath, Verb};

/// Request body forwarded verbatim
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

pub struct UpstreamClient {
    http_client: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(api_host: &str, proxy_config: Option<&UpstreamProxyConfig>) -> AppResult<Self> {
        let base_url = Url::parse(api_host)
            .map_err(|e| AppError::Config(format!("Invalid api_host {:?}: {}", api_host, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "api_host must be an absolute URL: {:?}",
                api_host
            )));
        }

        // No timeout: calls run to completion or transport failure.
        let http_client = crate::utils::http::create_client_with_proxy(None, proxy_config);

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build the absolute downstream URL
    ///
    /// Segments are percent-encoded; the query string is appended untouched.
    pub fn build_url(&self, path: &RemotePath, query: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.segments());
        }
        url.set_query(query.filter(|q| !q.is_empty()));
        url
    }

    /// Issue one downstream call and return the raw response body
    pub async fn request(
        &self,
        verb: Verb,
        path: &RemotePath,
        query: Option<&str>,
        access_token: &str,
        body: Option<UpstreamBody>,
    ) -> AppResult<String> {
        let url = self.build_url(path, query);
        let method = match verb {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Patch => Method::PATCH,
            Verb::Delete => Method::DELETE,
        };

        tracing::debug!("Upstream {} {}", method, url);

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(access_token);

        if verb.carries_body() {
            if let Some(body) = body {
                if let Some(content_type) = body.content_type {
                    request = request.header(header::CONTENT_TYPE, content_type);
                }
                request = request.body(body.bytes);
            }
        }

        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Upstream {} returned {}", path, status);
            return Err(AppError::Upstream { status, body: text });
        }

        Ok(text)
    }
}
