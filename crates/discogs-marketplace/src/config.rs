//! Client configuration
//!
//! Fixed for the lifetime of a `MarketplaceClient`. Built from defaults,
//! builder-style overrides, or environment variables:
//! - DISCOGS_API_URL
//! - DISCOGS_CURRENCY
//! - DISCOGS_TOKEN
//! - DISCOGS_USER_AGENT

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{MarketplaceError, Result};
use crate::transport::Token;
use crate::{DEFAULT_USER_AGENT, DISCOGS_API_BASE};

/// Currencies accepted by the marketplace `curr_abbr` parameter.
///
/// Closed set: these are the only codes the marketplace prices in, and any
/// other code is rejected at configuration time with `InvalidConfig` rather
/// than sent to the remote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Usd,
    Gbp,
    Eur,
    Cad,
    Aud,
    Jpy,
    Chf,
    Mxn,
    Brl,
    Nzd,
    Sek,
    Zar,
}

impl Currency {
    pub const ALL: [Currency; 12] = [
        Currency::Usd,
        Currency::Gbp,
        Currency::Eur,
        Currency::Cad,
        Currency::Aud,
        Currency::Jpy,
        Currency::Chf,
        Currency::Mxn,
        Currency::Brl,
        Currency::Nzd,
        Currency::Sek,
        Currency::Zar,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
            Currency::Mxn => "MXN",
            Currency::Brl => "BRL",
            Currency::Nzd => "NZD",
            Currency::Sek => "SEK",
            Currency::Zar => "ZAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| {
                let supported: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
                MarketplaceError::InvalidConfig(format!(
                    "unsupported currency '{}', expected one of {}",
                    s,
                    supported.join(", ")
                ))
            })
    }
}

/// Immutable marketplace client configuration
#[derive(Clone, Debug)]
pub struct MarketplaceConfig {
    base_url: String,
    currency: Currency,
    user_agent: String,
    token: Option<Token>,
    timeout: Duration,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: DISCOGS_API_BASE.to_string(),
            currency: Currency::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl MarketplaceConfig {
    /// Override the API base URL (must be http or https).
    /// A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            MarketplaceError::InvalidConfig(format!("invalid base URL '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MarketplaceError::InvalidConfig(format!(
                "base URL must be http(s): '{}'",
                base_url
            )));
        }

        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from DISCOGS_* environment variables, defaults for anything unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DISCOGS_API_URL") {
            config = config.with_base_url(&url)?;
        }
        if let Some(currency) = lookup("DISCOGS_CURRENCY") {
            config = config.with_currency(currency.parse()?);
        }
        if let Some(agent) = lookup("DISCOGS_USER_AGENT") {
            config = config.with_user_agent(agent);
        }
        if let Some(token) = lookup("DISCOGS_TOKEN").filter(|t| !t.is_empty()) {
            config = config.with_token(Token::new(token));
        }

        debug!("Loaded marketplace config: {:?}", config);
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
