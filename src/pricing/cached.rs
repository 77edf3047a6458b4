//! TTL-cached, rate-limited attribute pricing access.
//!
//! Wraps any `AttributePriceSource` with a per-item-name cache and the
//! upstream's rate-limit etiquette: a fixed delay after each cache-miss
//! round trip, applied once per miss regardless of how many lookups the
//! miss triggered. Lookup failures degrade to "no attribute pricing"
//! and are not cached, so the next call for the same name retries.

use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, warn};

use super::AttributePriceSource;
use crate::cache::{Clock, TtlCache};
use crate::types::AttributePrices;

pub struct CachedPrices<S: AttributePriceSource> {
    source: S,
    cache: TtlCache<String, AttributePrices>,
    delay: std::time::Duration,
}

impl<S: AttributePriceSource> CachedPrices<S> {
    pub fn new(
        source: S,
        ttl: Duration,
        delay: std::time::Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl, clock),
            delay,
        }
    }

    /// Sticker and charm prices for `item_name`, served from cache
    /// while fresh. Failures come back as `([], 0)`.
    pub async fn get_attribute_prices(&mut self, item_name: &str) -> AttributePrices {
        let key = item_name.to_string();

        if let Some(prices) = self.cache.get(&key) {
            debug!(item = %item_name, "Attribute price cache hit");
            return prices.clone();
        }

        match self.source.fetch_attribute_prices(item_name).await {
            Ok(prices) => {
                // Respect the upstream rate limit before handing the
                // result back — the pipeline is strictly sequential, so
                // this throttles the whole run.
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                self.cache.insert(key, prices.clone());
                prices
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    item = %item_name,
                    error = %e,
                    "Attribute price lookup failed, treating item as unpriced"
                );
                AttributePrices::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
