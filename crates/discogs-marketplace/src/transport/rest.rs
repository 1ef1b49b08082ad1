//! reqwest-backed transport
//!
//! Every request carries the configured `User-Agent`, and an
//! `Authorization` header when a token is configured.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::Transport;
use crate::config::MarketplaceConfig;
use crate::error::{MarketplaceError, Result};

/// HTTP transport for the Discogs API
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &MarketplaceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.token() {
            let mut value = HeaderValue::from_str(&token.header_value()).map_err(|_| {
                MarketplaceError::InvalidConfig("token contains invalid header characters".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Connectivity check: any HTTP answer counts as reachable
    pub async fn test_connectivity(&self, url: &str) -> Result<u16> {
        info!("Testing connectivity to {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        info!("Connectivity test: HTTP {}", status);

        Ok(status.as_u16())
    }
}

impl Transport for HttpTransport {
    async fn get_raw(&self, url: &str, params: &[(&str, String)]) -> Result<Value> {
        debug!("GET {} {:?}", url, params);

        let mut request = self.client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketplaceError::Http {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|source| MarketplaceError::Decode { url: url.to_string(), source })
    }
}
