//! Monitor pipeline.
//!
//! Orchestrates the single-run batch:
//! fetch → filter → enrich → score → threshold → notify.
//!
//! Items are enriched strictly one at a time, in marketplace order —
//! the pricing client's post-miss delay assumes serialized access.
//! Failures anywhere below the pipeline degrade per item; the run
//! itself always completes and reports.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::market::{cached::CachedItems, ItemSource};
use crate::notify::NotificationSink;
use crate::pricing::{cached::CachedPrices, AttributePriceSource};
use crate::scorer::Scorer;
use crate::types::{RunReport, ScoredListing};

pub struct Monitor<I, P, N>
where
    I: ItemSource,
    P: AttributePriceSource,
    N: NotificationSink,
{
    items: CachedItems<I>,
    prices: CachedPrices<P>,
    scorer: Scorer,
    sink: N,
    profit_threshold: Decimal,
}

impl<I, P, N> Monitor<I, P, N>
where
    I: ItemSource,
    P: AttributePriceSource,
    N: NotificationSink,
{
    pub fn new(
        items: CachedItems<I>,
        prices: CachedPrices<P>,
        scorer: Scorer,
        sink: N,
        profit_threshold: Decimal,
    ) -> Self {
        Self {
            items,
            prices,
            scorer,
            sink,
            profit_threshold,
        }
    }

    /// Run one fetch→filter→score→notify pass and report on it.
    pub async fn run(&mut self) -> RunReport {
        let run_id = Uuid::new_v4();
        info!(%run_id, threshold = %self.profit_threshold, "Starting market scan");

        // 1. Fetch (cached; failures already degraded to empty).
        let items = self.items.get_items().await;
        let items_fetched = items.len();
        if items.is_empty() {
            info!("Marketplace returned no items");
        }

        // 2. Eligibility filter: must carry a sticker or charm, must not
        //    be a souvenir.
        let eligible: Vec<_> = items.into_iter().filter(|i| i.is_eligible()).collect();
        debug!(
            fetched = items_fetched,
            eligible = eligible.len(),
            "Eligibility filter applied"
        );

        // 3. Enrich and score, one item at a time.
        let mut scored: Vec<ScoredListing> = Vec::with_capacity(eligible.len());
        for item in &eligible {
            let prices = self.prices.get_attribute_prices(&item.name).await;
            if let Some(listing) = self.scorer.score(item, &prices) {
                scored.push(listing);
            }
        }

        // 4. Threshold filter.
        let profitable: Vec<_> = scored
            .iter()
            .filter(|s| s.profit_percentage >= self.profit_threshold)
            .collect();

        // 5. Notify, one message per item in list order. A single
        //    delivery failure never blocks the remaining messages.
        let mut notifications_sent = 0;
        let mut notifications_failed = 0;
        if profitable.is_empty() {
            info!("No profitable items found");
        } else {
            for listing in &profitable {
                match self.sink.notify(&listing.notification_text()).await {
                    Ok(()) => {
                        info!(
                            item = %listing.item.name,
                            profit = %format!("{:.2}%", listing.profit_percentage),
                            "Notification sent"
                        );
                        notifications_sent += 1;
                    }
                    Err(e) => {
                        warn!(
                            sink = self.sink.name(),
                            item = %listing.item.name,
                            error = %e,
                            "Notification delivery failed, continuing"
                        );
                        notifications_failed += 1;
                    }
                }
            }
        }

        RunReport {
            run_id,
            completed_at: chrono::Utc::now(),
            items_fetched,
            items_eligible: eligible.len(),
            items_scored: scored.len(),
            items_profitable: profitable.len(),
            notifications_sent,
            notifications_failed,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
