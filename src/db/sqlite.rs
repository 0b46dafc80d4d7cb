// SqliteLedger: rusqlite backend implementing the Ledger trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{LedgerRecord, RecordOutcome};
use super::traits::Ledger;

pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Wrap an already-opened connection. The schema must already exist
    /// (see `db::initialize`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// In-memory ledger with the schema applied.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::create_tables(&conn)?;
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn contains(&self, paste_id: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::contains_paste(&conn, paste_id)
    }

    async fn record(&self, paste_id: &str) -> Result<RecordOutcome> {
        let conn = self.conn.lock().await;
        super::queries::record_paste(&conn, paste_id)
    }

    async fn count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::paste_count(&conn)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<LedgerRecord>> {
        let conn = self.conn.lock().await;
        super::queries::recent_pastes(&conn, limit)
    }
}
