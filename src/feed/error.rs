use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed returned 502 Bad Gateway")]
    BadGateway,

    #[error("Feed returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse feed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Feed response had no inner batch")]
    EmptyEnvelope,
}

impl FeedError {
    /// Transport failures and gateway errors are worth another attempt.
    /// A body we can't parse means the contract changed; retrying won't help.
    pub fn is_transient(&self) -> bool {
        matches!(self, FeedError::Transport(_) | FeedError::BadGateway)
    }
}
