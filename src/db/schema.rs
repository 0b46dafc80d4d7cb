// Ledger schema: table creation and migrations.
//
// A `schema_version` table tracks which migrations have run, and each
// migration is a function that executes SQL statements. The `pastes`
// table is append-only: rows are never updated or deleted.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create the ledger tables if they don't exist yet.
///
/// Idempotent: safe to call on every startup, including against a
/// ledger populated by a previous run.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Every paste ID that has ever been accepted as new
        CREATE TABLE IF NOT EXISTS pastes (
            id INTEGER PRIMARY KEY,
            paste_id VARCHAR(255) NOT NULL UNIQUE
        );
        ",
    )
    .context("Failed to create database tables")?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    // Migration v2: record when each ID was first seen (for `psbmon status`).
    // SQLite won't ALTER in a column with a non-constant default, so the
    // column is nullable and inserts fill it explicitly. Ledgers written
    // before this column existed keep NULL for their old rows.
    run_migration(conn, 2, |c| {
        if has_column(c, "pastes", "recorded_at")? {
            return Ok(());
        }
        c.execute_batch("ALTER TABLE pastes ADD COLUMN recorded_at TEXT;")
    })?;

    Ok(())
}

/// Run a migration if it hasn't been applied yet.
fn run_migration<F>(conn: &Connection, version: i64, migrate: F) -> Result<()>
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let already_applied: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM schema_version WHERE version = ?1",
        [version],
        |row| row.get(0),
    )?;

    if !already_applied {
        migrate(conn).with_context(|| format!("Migration v{version} failed"))?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
    }

    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name?.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
