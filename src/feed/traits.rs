use async_trait::async_trait;

use super::error::FeedError;
use super::models::PasteId;

/// Source of candidate paste IDs for one poll cycle.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// All pastes published today (local time), in feed order.
    async fn fetch_today(&self) -> Result<Vec<PasteId>, FeedError>;
}
