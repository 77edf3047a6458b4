//! DMarket exchange integration.
//!
//! Read-only scanning of CS2 market listings via the signed REST API.
//!
//! Endpoints:
//! - `GET /exchange/v1/market/items` — current listings
//! - `GET /price-history/v1/items` — last-sale / average prices
//!
//! Auth: HMAC-signed requests (see `market::auth`); the public key is
//! sent as `X-Api-Key`, the signature as `X-Request-Sign`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::{auth, ItemSource};
use crate::config::MarketplaceConfig;
use crate::types::{ItemRecord, ScanError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const SOURCE_NAME: &str = "dmarket";

const API_KEY_HEADER: &str = "X-Api-Key";
const SIGNATURE_HEADER: &str = "X-Request-Sign";

/// History window used for last-sale / weekly-average lookups.
const PRICE_HISTORY_PERIOD: &str = "7d";

// ---------------------------------------------------------------------------
// API response types (DMarket JSON → Rust)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MarketItemsResponse {
    #[serde(default)]
    objects: Vec<RawItem>,
}

/// A raw listing as returned by `/exchange/v1/market/items`.
/// We only deserialize the fields we need.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    #[serde(default, rename = "type")]
    item_type: String,
    title: String,
    /// Price strings keyed by currency code, e.g. `{"USD": "12.34"}`.
    #[serde(default)]
    price: Option<HashMap<String, String>>,
    #[serde(default)]
    extra: Option<RawExtra>,
    #[serde(default)]
    asset_id: Option<String>,
    #[serde(default)]
    game_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExtra {
    #[serde(default)]
    has_stickers: bool,
    #[serde(default)]
    has_charm: bool,
    #[serde(default)]
    is_souvenir: bool,
}

#[derive(Debug, Deserialize)]
struct PriceHistoryResponse {
    #[serde(default)]
    last: Option<LastSale>,
    #[serde(default)]
    average: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct LastSale {
    #[serde(default)]
    price: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Signed DMarket API client.
pub struct DmarketClient {
    http: Client,
    config: MarketplaceConfig,
    public_key: String,
    secret_key: String,
}

impl DmarketClient {
    /// Create a new client with resolved credentials.
    pub fn new(config: MarketplaceConfig, public_key: String, secret_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("PROSPECTOR/0.1.0 (market-scanner)")
            .build()
            .context("Failed to build HTTP client for DMarket")?;

        Ok(Self {
            http,
            config,
            public_key,
            secret_key,
        })
    }

    // -- Internal helpers ------------------------------------------------

    /// Issue a signed GET request. `path` includes the query string and
    /// is the exact string covered by the signature.
    async fn signed_get(&self, path: &str) -> Result<reqwest::Response> {
        let timestamp = Utc::now().timestamp_millis();
        let signature = auth::sign_request(&self.secret_key, "GET", path, "", timestamp)?;

        debug!(path = %path, "Fetching from DMarket");

        let resp = self
            .http
            .get(format!("{}{path}", self.config.base_url))
            .header(API_KEY_HEADER, &self.public_key)
            .header(SIGNATURE_HEADER, signature)
            .send()
            .await
            .context("DMarket API request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ScanError::Marketplace(format!("HTTP {status}: {body}")).into());
        }

        Ok(resp)
    }

    /// Fetch last-sale and weekly-average prices for one item title.
    async fn fetch_price_history(&self, title: &str) -> Result<PriceHistoryResponse> {
        let path = format!(
            "/price-history/v1/items?gameId={}&itemName={}&period={}&currency={}",
            self.config.game_id,
            urlencoding::encode(title),
            PRICE_HISTORY_PERIOD,
            self.config.currency,
        );

        let resp = self.signed_get(&path).await?;
        resp.json()
            .await
            .context("Failed to parse DMarket price-history response")
    }

    /// Parse a price string for the configured currency. Missing or
    /// malformed values degrade to zero rather than failing the batch.
    fn parse_price(raw: &RawItem, currency: &str) -> Decimal {
        let value = raw
            .price
            .as_ref()
            .and_then(|prices| prices.get(currency))
            .and_then(|s| Decimal::from_str(s).ok());

        match value {
            Some(price) => price,
            None => {
                warn!(item = %raw.title, currency, "Missing or malformed price, defaulting to 0");
                Decimal::ZERO
            }
        }
    }

    /// Convert a raw listing to an `ItemRecord`, defaulting absent
    /// optional fields.
    fn to_item_record(raw: RawItem, currency: &str) -> ItemRecord {
        let current_price = Self::parse_price(&raw, currency);
        let extra = raw.extra.unwrap_or_default();

        ItemRecord {
            item_type: raw.item_type,
            name: raw.title,
            current_price,
            last_sale_price: None,
            average_weekly_price: None,
            has_attribute_decoration: extra.has_stickers || extra.has_charm,
            is_souvenir: extra.is_souvenir,
            asset_id: raw.asset_id,
            game_id: raw.game_id,
        }
    }
}

// ---------------------------------------------------------------------------
// ItemSource trait implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl ItemSource for DmarketClient {
    /// Fetch current listings for the configured game.
    ///
    /// With `fetch_price_history` enabled, each listing gets a follow-up
    /// history lookup to fill last-sale and weekly-average prices; a
    /// failed lookup leaves those fields empty for that item only.
    async fn fetch_items(&self) -> Result<Vec<ItemRecord>> {
        let path = format!(
            "/exchange/v1/market/items?gameId={}&limit={}&currency={}",
            self.config.game_id, self.config.limit, self.config.currency,
        );

        let resp = self.signed_get(&path).await?;
        let response: MarketItemsResponse = resp
            .json()
            .await
            .context("Failed to parse DMarket market-items response")?;

        let mut items: Vec<ItemRecord> = response
            .objects
            .into_iter()
            .map(|raw| Self::to_item_record(raw, &self.config.currency))
            .collect();

        if self.config.fetch_price_history {
            for item in &mut items {
                match self.fetch_price_history(&item.name).await {
                    Ok(history) => {
                        item.last_sale_price = history.last.and_then(|l| l.price);
                        item.average_weekly_price = history.average;
                    }
                    Err(e) => {
                        warn!(item = %item.name, error = %e, "Price history lookup failed, continuing");
                    }
                }
            }
        }

        info!(count = items.len(), "DMarket scan complete");

        Ok(items)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
