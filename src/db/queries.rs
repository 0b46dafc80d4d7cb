// Ledger queries: every SQL statement touching the `pastes` table.
//
// Uniqueness is enforced by the table's UNIQUE constraint, and a
// violation is classified from SQLite's extended result code, never from
// the error message text.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{LedgerRecord, RecordOutcome};

/// Whether a paste ID has already been recorded. Read-only.
pub fn contains_paste(conn: &Connection, paste_id: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT id FROM pastes WHERE paste_id = ?1")?;
    let row: Option<i64> = stmt
        .query_row(params![paste_id], |row| row.get(0))
        .optional()
        .with_context(|| format!("Failed to look up paste_id {paste_id}"))?;
    Ok(row.is_some())
}

/// Insert a paste ID, reporting `Duplicate` if it is already present.
///
/// The insert is a single statement, so it is atomic on its own. This is
/// the authority on "is this new?"; a prior `contains_paste` is only an
/// optimisation.
pub fn record_paste(conn: &Connection, paste_id: &str) -> Result<RecordOutcome> {
    let result = conn.execute(
        "INSERT INTO pastes (paste_id, recorded_at) VALUES (?1, datetime('now'))",
        params![paste_id],
    );

    match result {
        Ok(_) => Ok(RecordOutcome::Inserted),
        Err(err) if is_unique_violation(&err) => Ok(RecordOutcome::Duplicate),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to save paste_id {paste_id} to ledger"))
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Total number of IDs in the ledger.
pub fn paste_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM pastes", [], |row| row.get(0))?;
    Ok(count)
}

/// Most recently recorded IDs, newest first.
pub fn recent_pastes(conn: &Connection, limit: u32) -> Result<Vec<LedgerRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, paste_id, recorded_at FROM pastes ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(LedgerRecord {
            row_id: row.get(0)?,
            paste_id: row.get(1)?,
            recorded_at: row.get(2)?,
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}
