//! Deterministic test doubles for pipeline integration tests.
//!
//! In-memory implementations of the source/sink traits with call
//! counting and forced errors, plus a manually-advanced clock — no
//! external dependencies, fully controllable from test code.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use prospector::cache::Clock;
use prospector::market::ItemSource;
use prospector::notify::NotificationSink;
use prospector::pricing::AttributePriceSource;
use prospector::types::{AttributePrices, ItemRecord};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// A clock that only moves when told to.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ---------------------------------------------------------------------------
// Item source
// ---------------------------------------------------------------------------

/// An `ItemSource` that serves a fixed listing and counts fetches.
pub struct StaticItems {
    items: Vec<ItemRecord>,
    fetch_count: Arc<Mutex<u32>>,
    /// If set, all fetches return this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl StaticItems {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self {
            items,
            fetch_count: Arc::new(Mutex::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing(message: &str) -> Self {
        let source = Self::new(Vec::new());
        *source.force_error.lock().unwrap() = Some(message.to_string());
        source
    }

    /// Shared counter handle, for asserting fetch counts after the
    /// source has been moved into the cached wrapper.
    pub fn fetch_counter(&self) -> Arc<Mutex<u32>> {
        self.fetch_count.clone()
    }
}

#[async_trait]
impl ItemSource for StaticItems {
    async fn fetch_items(&self) -> Result<Vec<ItemRecord>> {
        *self.fetch_count.lock().unwrap() += 1;
        if let Some(message) = self.force_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{message}"));
        }
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        "static-items"
    }
}

// ---------------------------------------------------------------------------
// Attribute price source
// ---------------------------------------------------------------------------

/// An `AttributePriceSource` backed by a name→prices map, recording the
/// order of lookups. Unknown names return empty pricing.
pub struct StaticPrices {
    prices: HashMap<String, AttributePrices>,
    lookups: Arc<Mutex<Vec<String>>>,
    /// Names whose lookups fail.
    failing_names: Vec<String>,
}

impl StaticPrices {
    pub fn new(prices: HashMap<String, AttributePrices>) -> Self {
        Self {
            prices,
            lookups: Arc::new(Mutex::new(Vec::new())),
            failing_names: Vec::new(),
        }
    }

    pub fn with_failing_name(mut self, name: &str) -> Self {
        self.failing_names.push(name.to_string());
        self
    }

    pub fn lookup_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.lookups.clone()
    }
}

#[async_trait]
impl AttributePriceSource for StaticPrices {
    async fn fetch_attribute_prices(&self, item_name: &str) -> Result<AttributePrices> {
        self.lookups.lock().unwrap().push(item_name.to_string());
        if self.failing_names.iter().any(|n| n == item_name) {
            return Err(anyhow!("simulated rate limit for {item_name}"));
        }
        Ok(self.prices.get(item_name).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "static-prices"
    }
}

// ---------------------------------------------------------------------------
// Notification sink
// ---------------------------------------------------------------------------

/// A `NotificationSink` that records delivered messages. Messages
/// containing a configured marker fail delivery instead.
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
    fail_marker: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail_marker: None,
        }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail_marker: Some(marker.to_string()),
        }
    }

    pub fn delivered(&self) -> Arc<Mutex<Vec<String>>> {
        self.messages.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, message: &str) -> Result<()> {
        if let Some(marker) = &self.fail_marker {
            if message.contains(marker) {
                return Err(anyhow!("simulated delivery failure"));
            }
        }
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording-sink"
    }
}

// ---------------------------------------------------------------------------
// Item builders
// ---------------------------------------------------------------------------

/// A decorated, non-souvenir item at the given prices.
pub fn decorated_item(name: &str, current: Decimal, last_sale: Option<Decimal>) -> ItemRecord {
    ItemRecord {
        item_type: "Rifle".to_string(),
        name: name.to_string(),
        current_price: current,
        last_sale_price: last_sale,
        average_weekly_price: None,
        has_attribute_decoration: true,
        is_souvenir: false,
        asset_id: None,
        game_id: Some("a8db".to_string()),
    }
}
