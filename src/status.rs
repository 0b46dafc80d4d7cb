// Ledger status display: size on disk, record count, most recent IDs.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::db::Ledger;

/// Display ledger status to the terminal.
pub async fn show(ledger: &dyn Ledger, db_display_path: &str, recent_limit: u32) -> Result<()> {
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Ledger: {} ({})", db_display_path, file_size);

    let total = ledger.count().await?;
    println!("Pastes recorded: {}", total);

    if total == 0 {
        println!("{}", "  Nothing recorded yet. Run `psbmon` to start polling.".dimmed());
        return Ok(());
    }

    let recent = ledger.recent(recent_limit).await?;
    println!("Most recent {}:", recent.len());
    for record in &recent {
        let seen = record.recorded_at.as_deref().unwrap_or("before timestamps");
        println!("  #{:<8} {}  ({})", record.row_id, record.paste_id.bold(), seen);
    }

    Ok(())
}

/// Whether a ledger file exists at this path yet.
pub fn ledger_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
