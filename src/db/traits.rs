// Ledger trait: async interface the poll pipeline uses for dedup.
//
// Implementor: SqliteLedger (wraps rusqlite). The pipeline only sees
// `&dyn Ledger`, so tests can substitute a ledger that fails on demand.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{LedgerRecord, RecordOutcome};

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Whether this paste ID has already been recorded.
    ///
    /// `Ok(false)` means "not found". `Err` is a storage fault, and the
    /// caller must treat the candidate as indeterminate.
    async fn contains(&self, paste_id: &str) -> Result<bool>;

    /// Atomically record a paste ID. A uniqueness violation is reported as
    /// `RecordOutcome::Duplicate`, never as an error.
    async fn record(&self, paste_id: &str) -> Result<RecordOutcome>;

    /// Number of IDs in the ledger.
    async fn count(&self) -> Result<i64>;

    /// Most recently recorded IDs, newest first.
    async fn recent(&self, limit: u32) -> Result<Vec<LedgerRecord>>;
}
