//! Attribute (sticker/charm) pricing integration.
//!
//! Defines the `AttributePriceSource` trait, the Steam price-overview
//! client, and the rate-limited cached wrapper the pipeline consumes.

pub mod cached;
pub mod steam;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::AttributePrices;

/// Abstraction over the attribute pricing source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttributePriceSource: Send + Sync {
    /// Fetch sticker and charm prices for one item name.
    async fn fetch_attribute_prices(&self, item_name: &str) -> Result<AttributePrices>;

    /// Source name for logging and identification.
    fn name(&self) -> &str;
}
