//! Error type shared by the transport and the marketplace client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketplaceError>;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// Remote answered with a non-success status
    #[error("HTTP {status} for {url}: {body}")]
    Http { status: u16, url: String, body: String },

    /// Connection, timeout, or request builder failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Body was not JSON, or did not match the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MarketplaceError {
    /// HTTP status code, if the remote answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            MarketplaceError::Http { status, .. } => Some(*status),
            MarketplaceError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
