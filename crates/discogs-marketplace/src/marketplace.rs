//! Marketplace client
//!
//! # Endpoints
//! - GET /listings/{listing_id}?curr_abbr={currency} - Single listing
//! - GET /stats/{release_id}?curr_abbr={currency} - Release statistics (auth optional)
//! - GET /price_suggestions/{release_id} - Suggested prices per grade (auth required)
//!
//! IDs are passed through unvalidated; the remote decides what exists.
//!
//! # Source
//! - https://www.discogs.com/developers/#page:marketplace

use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde_json::Value;
use tracing::debug;

use crate::config::MarketplaceConfig;
use crate::error::{MarketplaceError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{Listing, PriceListing, Stats};

const LISTINGS_PATH: &str = "/listings/";
const PRICE_SUGGESTIONS_PATH: &str = "/price_suggestions/";
const RELEASE_STATS_PATH: &str = "/stats/";

const CURRENCY_PARAM: &str = "curr_abbr";

/// A fully built GET request: absolute URL plus query parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

/// Discogs marketplace client
#[derive(Clone, Debug)]
pub struct MarketplaceClient<T = HttpTransport> {
    config: MarketplaceConfig,
    transport: T,
}

impl MarketplaceClient<HttpTransport> {
    /// Create a client backed by `HttpTransport`
    pub fn new(config: MarketplaceConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    /// Hit the base URL; any HTTP status counts as reachable
    pub async fn test_connectivity(&self) -> Result<u16> {
        self.transport.test_connectivity(self.config.base_url()).await
    }
}

impl<T: Transport> MarketplaceClient<T> {
    pub fn with_transport(config: MarketplaceConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn listing_request(&self, listing_id: i64) -> ApiRequest {
        ApiRequest {
            url: format!("{}{}{}", self.config.base_url(), LISTINGS_PATH, listing_id),
            params: self.currency_params(),
        }
    }

    pub fn release_statistics_request(&self, release_id: i64) -> ApiRequest {
        ApiRequest {
            url: format!("{}{}{}", self.config.base_url(), RELEASE_STATS_PATH, release_id),
            params: self.currency_params(),
        }
    }

    pub fn price_suggestions_request(&self, release_id: i64) -> ApiRequest {
        ApiRequest {
            url: format!("{}{}{}", self.config.base_url(), PRICE_SUGGESTIONS_PATH, release_id),
            params: Vec::new(),
        }
    }

    /// Listing by ID, price in the configured currency
    pub async fn listing(&self, listing_id: i64) -> Result<Listing> {
        self.fetch(self.listing_request(listing_id)).await
    }

    /// Marketplace summary for a release, price in the configured currency
    pub async fn release_statistics(&self, release_id: i64) -> Result<Stats> {
        self.fetch(self.release_statistics_request(release_id)).await
    }

    /// Suggested prices per grade for a release.
    ///
    /// Requires an authenticated transport (see `Token`). Prices come back
    /// in the account's currency; `curr_abbr` is not sent.
    pub async fn price_suggestions(&self, release_id: i64) -> Result<PriceListing> {
        self.fetch(self.price_suggestions_request(release_id)).await
    }

    fn currency_params(&self) -> Vec<(&'static str, String)> {
        vec![(CURRENCY_PARAM, self.config.currency().code().to_string())]
    }

    /// Every marketplace payload is a JSON object; derived struct decoding
    /// would otherwise accept an array as a positional struct.
    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let value = self.transport.get_raw(&request.url, &request.params).await?;
        debug!("Decoding response from {}", request.url);

        if let Some(unexpected) = non_object(&value) {
            let source = serde_json::Error::invalid_type(unexpected, &"a JSON object");
            return Err(MarketplaceError::Decode { url: request.url, source });
        }

        serde_json::from_value(value)
            .map_err(|source| MarketplaceError::Decode { url: request.url, source })
    }
}

fn non_object(value: &Value) -> Option<Unexpected<'_>> {
    match value {
        Value::Object(_) => None,
        Value::Array(_) => Some(Unexpected::Seq),
        Value::Null => Some(Unexpected::Unit),
        Value::Bool(b) => Some(Unexpected::Bool(*b)),
        Value::Number(_) => Some(Unexpected::Other("number")),
        Value::String(s) => Some(Unexpected::Str(s)),
    }
}
