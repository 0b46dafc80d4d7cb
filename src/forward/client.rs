use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::traits::EventSink;

/// Posts paste IDs to `{host}/event` as JSON strings.
pub struct EventForwarder {
    client: reqwest::Client,
    event_url: String,
}

impl EventForwarder {
    pub fn new(host: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            event_url: event_url(host),
        })
    }

    pub fn event_url(&self) -> &str {
        &self.event_url
    }
}

#[async_trait]
impl EventSink for EventForwarder {
    async fn forward(&self, paste_id: &str) -> Result<()> {
        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.event_url)
            .json(paste_id)
            .send()
            .await
            .with_context(|| format!("Failed to forward paste_id {paste_id} to {}", self.event_url))?;

        debug!(
            paste_id = paste_id,
            status = response.status().as_u16(),
            "Event delivered"
        );
        Ok(())
    }
}

/// `{host}/event`, without doubling a trailing slash on the host.
pub fn event_url(host: &str) -> String {
    format!("{}/event", host.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_url() {
        assert_eq!(event_url("http://dg.local:8080"), "http://dg.local:8080/event");
        assert_eq!(event_url("http://dg.local:8080/"), "http://dg.local:8080/event");
        assert_eq!(event_url("https://dg.example/api"), "https://dg.example/api/event");
    }
}
