//! Profit scoring.
//!
//! Compares the estimated value added by stickers/charms against the
//! seller's markup over the last sale and expresses the balance as a
//! percentage of the asking price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::types::{AttributePrices, ItemRecord, ScoredListing};

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Markup coefficients: the fraction of attribute resale value that is
/// assumed to transfer into the item's own price.
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub sticker_markup_coeff: Decimal,
    pub charm_markup_coeff: Decimal,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            sticker_markup_coeff: dec!(0.1),
            charm_markup_coeff: dec!(0.2),
        }
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Pure profit scorer. No I/O, no mutation, deterministic.
pub struct Scorer {
    config: ScoreConfig,
}

impl Scorer {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Access the scoring configuration.
    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score one item against its attribute prices.
    ///
    /// Returns `None` for a zero asking price — the profit percentage is
    /// undefined there, so the item is skipped rather than divided by zero.
    pub fn score(&self, item: &ItemRecord, prices: &AttributePrices) -> Option<ScoredListing> {
        if item.current_price.is_zero() {
            debug!(item = %item.name, "Zero asking price, skipping");
            return None;
        }

        let attribute_markup = self.attribute_markup(prices);
        let seller_markup = item.current_price - item.last_sale_price.unwrap_or_default();
        let profit_percentage =
            (attribute_markup - seller_markup) / item.current_price * dec!(100);

        debug!(
            item = %item.name,
            attribute_markup = %attribute_markup,
            seller_markup = %seller_markup,
            profit = %format!("{profit_percentage:.2}%"),
            "Item scored"
        );

        Some(ScoredListing {
            item: item.clone(),
            attribute_markup,
            seller_markup,
            profit_percentage,
        })
    }

    /// Estimated dollar value the attributes add to the item.
    fn attribute_markup(&self, prices: &AttributePrices) -> Decimal {
        let sticker_markup: Decimal = prices
            .sticker_prices
            .iter()
            .map(|p| p * self.config.sticker_markup_coeff)
            .sum();
        sticker_markup + prices.charm_price * self.config.charm_markup_coeff
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
