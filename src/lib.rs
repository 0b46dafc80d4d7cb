// psbmon: paste dump monitor.
//
// This is the library root. Each module corresponds to one stage of the
// poll → dedupe → deliver pipeline, plus the glue that configures it.

pub mod config;
pub mod db;
pub mod feed;
pub mod forward;
pub mod pipeline;
pub mod retry;
pub mod status;

/// Sent on every outbound request, upstream and downstream.
pub const USER_AGENT: &str = concat!("psbmon/", env!("CARGO_PKG_VERSION"));
