//! Marketplace integration.
//!
//! Defines the `ItemSource` trait, the signed DMarket API client, and
//! the TTL-cached wrapper the pipeline consumes.

pub mod auth;
pub mod cached;
pub mod dmarket;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::ItemRecord;

/// Abstraction over the marketplace item feed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch the current item listings from the marketplace.
    async fn fetch_items(&self) -> Result<Vec<ItemRecord>>;

    /// Source name for logging and identification.
    fn name(&self) -> &str;
}
