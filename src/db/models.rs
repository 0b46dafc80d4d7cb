// Ledger data models: Rust structs mirroring the `pastes` table.

/// One row of the ledger: a paste ID that has been processed.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRecord {
    /// SQLite rowid, monotonic
    pub row_id: i64,
    pub paste_id: String,
    /// None for rows written before first-seen timestamps were tracked
    pub recorded_at: Option<String>,
}

/// What happened when we tried to add a paste ID to the ledger.
///
/// Hard storage failures are the `Err` side of the surrounding `Result`;
/// a uniqueness violation is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new row was written. This is the commit point for the ID.
    Inserted,
    /// The ID was already in the ledger. Nothing was written.
    Duplicate,
}

impl RecordOutcome {
    pub fn is_new(self) -> bool {
        matches!(self, RecordOutcome::Inserted)
    }
}
