// Feed fetcher: today's paste IDs from the psbdmp.cc "get by date" API.
//
// The upstream sits behind Cloudflare and intermittently answers 502, so
// requests go through the bounded retry helper. Everything else (malformed
// bodies, other statuses) is a hard error for the cycle.

pub mod client;
pub mod error;
pub mod models;
pub mod traits;

pub use client::FeedClient;
pub use error::FeedError;
pub use models::PasteId;
pub use traits::FeedSource;
