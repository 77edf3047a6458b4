//! PROSPECTOR — Marketplace Sticker & Charm Profit Scanner
//!
//! Entry point. Loads configuration, initialises structured logging,
//! wires the clients into the pipeline, runs a single
//! fetch→filter→score→notify pass, and exits. Scheduling repeated runs
//! is the caller's job (cron or similar); concurrent invocations are
//! not supported.

use anyhow::Result;
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

use prospector::cache::SystemClock;
use prospector::config::AppConfig;
use prospector::market::cached::CachedItems;
use prospector::market::dmarket::DmarketClient;
use prospector::monitor::Monitor;
use prospector::notify::telegram::TelegramNotifier;
use prospector::pricing::cached::CachedPrices;
use prospector::pricing::steam::SteamClient;
use prospector::scorer::{ScoreConfig, Scorer};

const BANNER: &str = r#"
 ____  ____   ___  ____  ____  _____ ____ _____ ___  ____
|  _ \|  _ \ / _ \/ ___||  _ \| ____/ ___|_   _/ _ \|  _ \
| |_) | |_) | | | \___ \| |_) |  _|| |     | || | | | |_) |
|  __/|  _ <| |_| |___) |  __/| |__| |___  | || |_| |  _ <
|_|   |_| \_\\___/|____/|_|   |_____\____| |_| \___/|_| \_\

  Marketplace Sticker & Charm Profit Scanner
  v0.1.0 — Single-run batch job
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML. Missing credentials or URLs are the
    // one fatal error class — everything past this point degrades.
    let cfg = AppConfig::load("config.toml")?;

    init_logging();

    println!("{BANNER}");
    info!(
        marketplace = %cfg.marketplace.base_url,
        game_id = %cfg.marketplace.game_id,
        profit_threshold = %cfg.scanner.profit_threshold,
        cache_duration_secs = cfg.scanner.cache_duration_secs,
        "PROSPECTOR starting up"
    );

    // -- Resolve credentials ---------------------------------------------

    let dmarket_public_key = AppConfig::resolve_env(&cfg.marketplace.public_key_env)?;
    let dmarket_secret_key = AppConfig::resolve_env(&cfg.marketplace.secret_key_env)?;
    let steam_api_key = AppConfig::resolve_env(&cfg.pricing.api_key_env)?;
    let telegram_bot_token = AppConfig::resolve_env(&cfg.alerts.telegram_bot_token_env)?;
    let telegram_chat_id = AppConfig::resolve_env(&cfg.alerts.telegram_chat_id_env)?;

    // -- Initialise components -------------------------------------------

    let dmarket = DmarketClient::new(
        cfg.marketplace.clone(),
        dmarket_public_key,
        dmarket_secret_key,
    )?;
    let steam = SteamClient::new(cfg.pricing.clone(), steam_api_key)?;
    let telegram = TelegramNotifier::new(telegram_bot_token, telegram_chat_id)?;

    let clock = Arc::new(SystemClock);
    let ttl = Duration::seconds(cfg.scanner.cache_duration_secs as i64);
    let request_delay = std::time::Duration::from_millis(cfg.pricing.request_delay_ms);

    let items = CachedItems::new(dmarket, ttl, clock.clone());
    let prices = CachedPrices::new(steam, ttl, request_delay, clock);
    let scorer = Scorer::new(ScoreConfig {
        sticker_markup_coeff: cfg.scanner.sticker_markup_coeff,
        charm_markup_coeff: cfg.scanner.charm_markup_coeff,
    });

    let mut monitor = Monitor::new(
        items,
        prices,
        scorer,
        telegram,
        cfg.scanner.profit_threshold,
    );

    // -- Single run ------------------------------------------------------

    let report = monitor.run().await;
    info!(
        run_id = %report.run_id,
        fetched = report.items_fetched,
        eligible = report.items_eligible,
        scored = report.items_scored,
        profitable = report.items_profitable,
        sent = report.notifications_sent,
        failed = report.notifications_failed,
        "Scan complete"
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("prospector=info"));

    let json_logging = std::env::var("PROSPECTOR_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
