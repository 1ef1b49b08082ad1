//! Discogs Marketplace Client
//!
//! Typed bindings for the public marketplace endpoints:
//! - `marketplace`: `MarketplaceClient` (listing, release statistics, price suggestions)
//! - `transport`: `Transport` seam plus the reqwest-backed `HttpTransport`
//! - `config`: immutable client configuration (base URL, currency, token)
//!
//! # Official Documentation
//! - Marketplace: https://www.discogs.com/developers/#page:marketplace
//! - Authentication: https://www.discogs.com/developers/#page:authentication

pub mod config;
pub mod error;
pub mod marketplace;
pub mod transport;
pub mod types;

pub use config::{Currency, MarketplaceConfig};
pub use error::{MarketplaceError, Result};
pub use marketplace::{ApiRequest, MarketplaceClient};
pub use transport::{HttpTransport, Token, Transport};
pub use types::*;

/// Official Discogs API base URL
pub const DISCOGS_API_BASE: &str = "https://api.discogs.com";

/// Default `User-Agent` sent with every request.
/// Discogs rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = concat!("discogs-marketplace/", env!("CARGO_PKG_VERSION"));
