//! Steam community market price lookups.
//!
//! For each item name, two `priceoverview` lookups are issued: one for
//! the sticker variant and one for the charm variant. Price strings
//! come back with a currency-symbol prefix ("$4.20") that is stripped
//! before parsing.
//!
//! Endpoint: `GET {base}/market/priceoverview`
//! Auth: `Authorization: Bearer {key}`.
//! Rate limit: enforced by the cached wrapper, not here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

use super::AttributePriceSource;
use crate::config::PricingConfig;
use crate::types::{AttributePrices, ScanError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const SOURCE_NAME: &str = "steam";

/// Market-name suffix for the sticker variant lookup.
const STICKER_SUFFIX: &str = "Sticker";

/// Market-name suffix for the charm variant lookup.
const CHARM_SUFFIX: &str = "Charm";

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

/// The subset of the `priceoverview` response we consume.
#[derive(Debug, Deserialize)]
struct PriceOverview {
    /// Observed sale prices, one string per listing.
    #[serde(default)]
    prices: Vec<String>,
    /// Lowest current listing price.
    #[serde(default)]
    lowest_price: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Steam market price client.
pub struct SteamClient {
    http: Client,
    config: PricingConfig,
    api_key: String,
}

impl SteamClient {
    pub fn new(config: PricingConfig, api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("PROSPECTOR/0.1.0")
            .build()
            .context("Failed to build HTTP client for Steam")?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    // -- Internal helpers ------------------------------------------------

    /// One `priceoverview` lookup for a full market hash name.
    async fn price_overview(&self, market_hash_name: &str) -> Result<PriceOverview> {
        let url = format!(
            "{}/market/priceoverview?appid={}&market_hash_name={}&currency={}",
            self.config.base_url,
            self.config.app_id,
            urlencoding::encode(market_hash_name),
            self.config.currency,
        );

        debug!(name = %market_hash_name, "Fetching Steam price overview");

        let resp = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .context("Steam price overview request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            return Err(ScanError::Pricing {
                item: market_hash_name.to_string(),
                message: format!("HTTP {status}"),
            }
            .into());
        }

        resp.json()
            .await
            .context("Failed to parse Steam price overview response")
    }

    /// Strip a currency-symbol prefix and parse the remainder.
    /// Returns `None` for strings with no parseable number.
    fn parse_price(raw: &str) -> Option<Decimal> {
        let cleaned = raw.trim().trim_start_matches(|c: char| !c.is_ascii_digit());
        Decimal::from_str(cleaned).ok()
    }
}

// ---------------------------------------------------------------------------
// AttributePriceSource trait implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl AttributePriceSource for SteamClient {
    /// Fetch sticker prices and the lowest charm price for an item.
    ///
    /// Unparseable sticker entries are dropped; a missing or
    /// unparseable charm price defaults to zero.
    async fn fetch_attribute_prices(&self, item_name: &str) -> Result<AttributePrices> {
        let sticker = self
            .price_overview(&format!("{item_name} {STICKER_SUFFIX}"))
            .await?;
        let charm = self
            .price_overview(&format!("{item_name} {CHARM_SUFFIX}"))
            .await?;

        let sticker_prices: Vec<Decimal> = sticker
            .prices
            .iter()
            .filter_map(|p| Self::parse_price(p))
            .collect();
        let charm_price = charm
            .lowest_price
            .as_deref()
            .and_then(Self::parse_price)
            .unwrap_or_default();

        debug!(
            item = %item_name,
            stickers = sticker_prices.len(),
            charm = %charm_price,
            "Attribute prices fetched"
        );

        Ok(AttributePrices {
            sticker_prices,
            charm_price,
        })
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
