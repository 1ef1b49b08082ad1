//! Discogs Marketplace Smoke Test CLI
//!
//! Commands:
//! - `listing`: Fetch a single marketplace listing
//! - `stats`: Fetch marketplace statistics for a release
//! - `suggestions`: Fetch price suggestions for a release (requires a token)
//! - `ping`: Test API connectivity
//!
//! # Usage
//! ```bash
//! discogs_smoke listing --id 172723812 --currency EUR
//! discogs_smoke stats --release-id 249504
//!
//! # Price suggestions (requires token)
//! DISCOGS_TOKEN=... discogs_smoke suggestions --release-id 249504
//!
//! # Against a local mock
//! discogs_smoke --base-url http://localhost:8080 ping
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{error, info, warn};

use discogs_marketplace::{Currency, MarketplaceClient, MarketplaceConfig, Token};

#[derive(Parser)]
#[command(name = "discogs_smoke")]
#[command(about = "Discogs marketplace smoke test CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides DISCOGS_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Currency for listing and stats prices, e.g. USD, EUR (overrides DISCOGS_CURRENCY)
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Personal access token (overrides DISCOGS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// User-Agent header (overrides DISCOGS_USER_AGENT)
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a marketplace listing
    Listing {
        /// Listing ID
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
    },

    /// Fetch marketplace statistics for a release
    Stats {
        /// Release ID
        #[arg(long, allow_negative_numbers = true)]
        release_id: i64,
    },

    /// Fetch price suggestions per grade for a release (requires token)
    Suggestions {
        /// Release ID
        #[arg(long, allow_negative_numbers = true)]
        release_id: i64,
    },

    /// Test API connectivity
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = build_client(&cli)?;

    info!("Base URL: {}", client.config().base_url());
    info!("Currency: {}", client.config().currency());

    let output = match cli.command {
        Commands::Listing { id } => {
            info!("Fetching listing {}", id);
            let listing = client.listing(id).await.context("listing request failed")?;
            info!("{} [{}] {} {}", listing.title, listing.status, listing.price.value, listing.price.currency);
            serde_json::to_value(&listing)?
        }
        Commands::Stats { release_id } => {
            info!("Fetching statistics for release {}", release_id);
            let stats = client
                .release_statistics(release_id)
                .await
                .context("release statistics request failed")?;
            if stats.blocked {
                warn!("Release {} is blocked from sale", release_id);
            }
            info!("For sale: {}", stats.for_sale);
            serde_json::to_value(&stats)?
        }
        Commands::Suggestions { release_id } => {
            if client.config().token().is_none() {
                warn!("No token configured; price suggestions require authentication");
            }
            info!("Fetching price suggestions for release {}", release_id);
            let suggestions = client
                .price_suggestions(release_id)
                .await
                .context("price suggestions request failed")?;
            if suggestions.near_mint.is_none() {
                warn!("Response has no Near Mint suggestion");
            }
            for (grade, listing) in suggestions.iter() {
                info!("  {}: {} {}", grade, listing.price.value, listing.price.currency);
            }
            serde_json::to_value(&suggestions)?
        }
        Commands::Ping => {
            match client.test_connectivity().await {
                Ok(status) => info!("Connectivity: OK (HTTP {})", status),
                Err(e) => {
                    error!("Connectivity failed: {}", e);
                    return Err(e.into());
                }
            }
            return Ok(());
        }
    };

    print_json(&output)
}

fn build_client(cli: &Cli) -> Result<MarketplaceClient> {
    let config = MarketplaceConfig::from_env().context("invalid DISCOGS_* environment")?;
    let config = apply_overrides(config, cli)?;

    MarketplaceClient::new(config).context("failed to build marketplace client")
}

/// Command-line flags win over the environment
fn apply_overrides(mut config: MarketplaceConfig, cli: &Cli) -> Result<MarketplaceConfig> {
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(currency) = &cli.currency {
        config = config.with_currency(currency.parse::<Currency>()?);
    }
    if let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) {
        config = config.with_token(Token::new(token));
    }
    if let Some(user_agent) = &cli.user_agent {
        config = config.with_user_agent(user_agent.as_str());
    }
    Ok(config)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
