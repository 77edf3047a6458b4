//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (API keys, chat ids) are referenced by env-var name in the
//! config and resolved at runtime via `std::env::var`. The scanner
//! tuning knobs additionally honor the flat env names the original
//! deployment used (`PROFIT_THRESHOLD`, `STICKER_MARKUP_COEFF`,
//! `CHARM_MARKUP_COEFF`, `CACHE_DURATION`).

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::str::FromStr;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub scanner: ScannerConfig,
    pub marketplace: MarketplaceConfig,
    pub pricing: PricingConfig,
    pub alerts: AlertsConfig,
}

/// Profit-scoring and cache tuning knobs.
#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Minimum profit percentage for an item to be notified.
    #[serde(default = "default_profit_threshold")]
    pub profit_threshold: Decimal,
    /// Fraction of sticker resale value attributed to markup.
    #[serde(default = "default_sticker_coeff")]
    pub sticker_markup_coeff: Decimal,
    /// Fraction of charm resale value attributed to markup.
    #[serde(default = "default_charm_coeff")]
    pub charm_markup_coeff: Decimal,
    /// TTL for both client caches, in seconds.
    #[serde(default = "default_cache_duration")]
    pub cache_duration_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketplaceConfig {
    pub base_url: String,
    /// CS2 game identifier on the marketplace.
    #[serde(default = "default_game_id")]
    pub game_id: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_public_key_env")]
    pub public_key_env: String,
    #[serde(default = "default_secret_key_env")]
    pub secret_key_env: String,
    /// When set, each fetched item gets a price-history lookup to fill
    /// last-sale and weekly-average prices (one extra request per item).
    #[serde(default)]
    pub fetch_price_history: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    #[serde(default = "default_pricing_base_url")]
    pub base_url: String,
    /// Steam app id for CS2.
    #[serde(default = "default_app_id")]
    pub app_id: String,
    /// Steam currency code (1 = USD).
    #[serde(default = "default_pricing_currency")]
    pub currency: u32,
    #[serde(default = "default_steam_key_env")]
    pub api_key_env: String,
    /// Delay applied once per cache miss, after the lookups complete.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertsConfig {
    #[serde(default = "default_bot_token_env")]
    pub telegram_bot_token_env: String,
    #[serde(default = "default_chat_id_env")]
    pub telegram_chat_id_env: String,
}

fn default_profit_threshold() -> Decimal {
    dec!(10)
}
fn default_sticker_coeff() -> Decimal {
    dec!(0.1)
}
fn default_charm_coeff() -> Decimal {
    dec!(0.2)
}
fn default_cache_duration() -> u64 {
    60
}
fn default_game_id() -> String {
    "a8db".to_string()
}
fn default_limit() -> u32 {
    10
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_public_key_env() -> String {
    "DMARKET_PUBLIC_KEY".to_string()
}
fn default_secret_key_env() -> String {
    "DMARKET_SECRET_KEY".to_string()
}
fn default_pricing_base_url() -> String {
    "https://steamcommunity.com".to_string()
}
fn default_app_id() -> String {
    "730".to_string()
}
fn default_pricing_currency() -> u32 {
    1
}
fn default_steam_key_env() -> String {
    "STEAM_API_KEY".to_string()
}
fn default_request_delay_ms() -> u64 {
    1000
}
fn default_bot_token_env() -> String {
    "TELEGRAM_BOT_TOKEN".to_string()
}
fn default_chat_id_env() -> String {
    "TELEGRAM_CHAT_ID".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file and apply flat env overrides.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.scanner.apply_env_overrides()?;
        Ok(config)
    }

    /// Resolve an environment variable name to its value.
    /// Used for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}

impl ScannerConfig {
    /// Override tuning knobs from the flat env names the original
    /// deployment style used. A set-but-unparseable value is a startup
    /// error, not a silent fallback.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var("PROFIT_THRESHOLD") {
            self.profit_threshold = Decimal::from_str(&raw)
                .with_context(|| format!("Invalid PROFIT_THRESHOLD: {raw}"))?;
        }
        if let Ok(raw) = std::env::var("STICKER_MARKUP_COEFF") {
            self.sticker_markup_coeff = Decimal::from_str(&raw)
                .with_context(|| format!("Invalid STICKER_MARKUP_COEFF: {raw}"))?;
        }
        if let Ok(raw) = std::env::var("CHARM_MARKUP_COEFF") {
            self.charm_markup_coeff = Decimal::from_str(&raw)
                .with_context(|| format!("Invalid CHARM_MARKUP_COEFF: {raw}"))?;
        }
        if let Ok(raw) = std::env::var("CACHE_DURATION") {
            self.cache_duration_secs = raw
                .parse::<u64>()
                .with_context(|| format!("Invalid CACHE_DURATION: {raw}"))?;
        }
        Ok(())
    }
}
