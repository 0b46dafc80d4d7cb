use anyhow::Result;
use async_trait::async_trait;

/// Destination for newly seen paste IDs.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one ID. A single attempt; `Err` only for transport failures.
    async fn forward(&self, paste_id: &str) -> Result<()>;
}
