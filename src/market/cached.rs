//! TTL-cached marketplace access.
//!
//! Wraps any `ItemSource` with a single-slot cache so repeated calls
//! within the cache window reuse the previous fetch. Upstream failures
//! degrade to an empty item list — the caller must treat an empty list
//! as "no data this cycle", not as an empty market.

use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, warn};

use super::ItemSource;
use crate::cache::{Clock, TtlCache};
use crate::types::ItemRecord;

/// The one logical query this client serves: all items for the
/// configured game.
const ITEMS_CACHE_KEY: &str = "items";

pub struct CachedItems<S: ItemSource> {
    source: S,
    cache: TtlCache<&'static str, Vec<ItemRecord>>,
}

impl<S: ItemSource> CachedItems<S> {
    pub fn new(source: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl, clock),
        }
    }

    /// Current item listings, served from cache while fresh.
    ///
    /// A failed fetch is logged and cached as an empty list for the
    /// cache window, like any other result.
    pub async fn get_items(&mut self) -> Vec<ItemRecord> {
        if let Some(items) = self.cache.get(&ITEMS_CACHE_KEY) {
            debug!(count = items.len(), "Item cache hit");
            return items.clone();
        }

        let items = match self.source.fetch_items().await {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    error = %e,
                    "Marketplace fetch failed, continuing with no items"
                );
                Vec::new()
            }
        };

        self.cache.insert(ITEMS_CACHE_KEY, items.clone());
        items
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
