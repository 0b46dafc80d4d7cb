use serde::{Deserialize, Serialize};

/// A single paste entry reported by the daily feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PasteId {
    pub id: String,
    /// Free-text tags, often empty
    #[serde(default)]
    pub tags: String,
    /// Unix timestamp the paste was indexed at
    pub date: i64,
}
