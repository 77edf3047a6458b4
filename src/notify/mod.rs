//! Notification delivery.
//!
//! Defines the `NotificationSink` trait and the Telegram implementation.
//! Delivery is fire-and-forget from the pipeline's perspective: results
//! are awaited and logged, never branched on beyond a failure counter.

pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

/// Abstraction over the notification destination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one formatted message to the fixed destination.
    async fn notify(&self, message: &str) -> Result<()>;

    /// Sink name for logging and identification.
    fn name(&self) -> &str;
}
