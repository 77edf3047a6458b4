//! Shared types for the PROSPECTOR scanner.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that market, pricing, scoring,
//! and pipeline modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Item record
// ---------------------------------------------------------------------------

/// A marketplace listing snapshot.
///
/// `name` doubles as the join key into attribute pricing lookups.
/// All money fields are `Decimal` in the listing currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Category label from the marketplace ("Rifle", "Knife", ...).
    pub item_type: String,
    /// Display/market name.
    pub name: String,
    /// Current ask price. Non-negative.
    pub current_price: Decimal,
    /// Most recent observed sale price. Absent ⇒ treated as 0 in scoring.
    pub last_sale_price: Option<Decimal>,
    /// Average price over the last week. Informational only.
    pub average_weekly_price: Option<Decimal>,
    /// Whether the item carries a sticker or charm.
    pub has_attribute_decoration: bool,
    /// Whether the item is a souvenir variant.
    pub is_souvenir: bool,
    pub asset_id: Option<String>,
    pub game_id: Option<String>,
}

impl fmt::Display for ItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (${} | last: {} | decorated: {} | souvenir: {})",
            self.item_type,
            self.name,
            self.current_price,
            self.last_sale_price
                .map(|p| format!("${p}"))
                .unwrap_or_else(|| "n/a".to_string()),
            self.has_attribute_decoration,
            self.is_souvenir,
        )
    }
}

impl ItemRecord {
    /// Whether the item is worth scoring at all: it must carry a sticker
    /// or charm and must not be a souvenir variant.
    pub fn is_eligible(&self) -> bool {
        self.has_attribute_decoration && !self.is_souvenir
    }

    /// Helper to build a test item with sensible defaults.
    #[cfg(test)]
    pub fn sample() -> Self {
        use rust_decimal_macros::dec;
        ItemRecord {
            item_type: "Rifle".to_string(),
            name: "AK-47 | Asiimov (Field-Tested)".to_string(),
            current_price: dec!(100),
            last_sale_price: Some(dec!(90)),
            average_weekly_price: Some(dec!(95)),
            has_attribute_decoration: true,
            is_souvenir: false,
            asset_id: Some("asset-001".to_string()),
            game_id: Some("a8db".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute prices
// ---------------------------------------------------------------------------

/// Sticker and charm prices fetched for a single item name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributePrices {
    /// Observed sticker sale prices, one entry per listing.
    pub sticker_prices: Vec<Decimal>,
    /// Lowest observed charm price. Zero when none found.
    pub charm_price: Decimal,
}

impl fmt::Display for AttributePrices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sticker price(s), charm ${}",
            self.sticker_prices.len(),
            self.charm_price,
        )
    }
}

impl AttributePrices {
    /// Whether any attribute pricing was found at all.
    pub fn is_empty(&self) -> bool {
        self.sticker_prices.is_empty() && self.charm_price.is_zero()
    }
}

// ---------------------------------------------------------------------------
// Scored listing
// ---------------------------------------------------------------------------

/// An `ItemRecord` annotated with derived profit fields.
///
/// Produced by `scorer::Scorer::score` — never assembled by hand outside
/// the scorer and its tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredListing {
    pub item: ItemRecord,
    /// Estimated dollar value added by stickers/charms. Non-negative.
    pub attribute_markup: Decimal,
    /// `current_price − last_sale_price`. May be negative.
    pub seller_markup: Decimal,
    /// `(attribute_markup − seller_markup) / current_price × 100`.
    pub profit_percentage: Decimal,
}

impl fmt::Display for ScoredListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | attr=${:.2} seller=${:.2} profit={:.2}%",
            self.item.name,
            self.attribute_markup,
            self.seller_markup,
            self.profit_percentage,
        )
    }
}

impl ScoredListing {
    /// The full notification message for this listing. Derived values
    /// are formatted to two decimal places.
    pub fn notification_text(&self) -> String {
        let last_sale = self.item.last_sale_price.unwrap_or_default();
        let weekly = self.item.average_weekly_price.unwrap_or_default();
        format!(
            "Profitable item found:\n\
             Type: {}\n\
             Name: {}\n\
             Current price: ${}\n\
             Last sale price: ${}\n\
             Average weekly price: ${}\n\
             Has stickers or charm: {}\n\
             Souvenir item: {}\n\
             Attribute markup: ${:.2}\n\
             Seller markup: ${:.2}\n\
             Profit: {:.2}%",
            self.item.item_type,
            self.item.name,
            self.item.current_price,
            last_sale,
            weekly,
            self.item.has_attribute_decoration,
            self.item.is_souvenir,
            self.attribute_markup,
            self.seller_markup,
            self.profit_percentage,
        )
    }
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Summary of a single fetch→filter→score→notify run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub completed_at: DateTime<Utc>,
    /// Items returned by the marketplace fetch (post-cache).
    pub items_fetched: usize,
    /// Items that passed the decoration/souvenir filter.
    pub items_eligible: usize,
    /// Items the scorer produced a result for.
    pub items_scored: usize,
    /// Items at or above the profit threshold.
    pub items_profitable: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Run {}: fetched={} eligible={} scored={} profitable={} sent={} failed={}",
            self.run_id,
            self.items_fetched,
            self.items_eligible,
            self.items_scored,
            self.items_profitable,
            self.notifications_sent,
            self.notifications_failed,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for PROSPECTOR.
///
/// Transport-level failures are wrapped in these at the collaborator
/// boundaries; the cached clients convert them into empty results, so
/// they surface in logs only.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Marketplace error: {0}")]
    Marketplace(String),

    #[error("Pricing error for '{item}': {message}")]
    Pricing { item: String, message: String },

    #[error("Notification delivery failed: {0}")]
    Notification(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
