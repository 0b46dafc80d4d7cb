// Event forwarder: fire-and-forget delivery of new paste IDs downstream.
//
// Each newly recorded ID becomes one POST to `{DG_HOST}/event`. There is no
// retry and no response inspection: once the ledger write has succeeded
// the ID is done, whether or not the downstream host heard about it.

pub mod client;
pub mod traits;

pub use client::EventForwarder;
pub use traits::EventSink;
