// HTTP client for the psbdmp.cc daily feed.
//
// POSTs a `from=D.M.Y&to=D.M.Y` form body and gets back a JSON array that
// wraps a single inner array of paste records: `[[{id, tags, date}, ...]]`.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::error::FeedError;
use super::models::PasteId;
use super::traits::FeedSource;
use crate::retry::{with_retry, RetryPolicy};

/// Default upstream endpoint.
pub const DEFAULT_FEED_URL: &str = "https://psbdmp.cc/api/v3/getbydate";

pub struct FeedClient {
    client: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl FeedClient {
    /// Create a client for the given endpoint. `timeout` bounds each
    /// individual attempt, not the whole retry sequence.
    pub fn new(url: &str, timeout: Duration, retry: RetryPolicy) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
            retry,
        })
    }

    /// Fetch pastes published today in the local time zone.
    pub async fn fetch_today(&self) -> Result<Vec<PasteId>, FeedError> {
        let today = Local::now().date_naive();
        self.fetch_range(today, today).await
    }

    /// Fetch pastes published between `from` and `to`, inclusive.
    pub async fn fetch_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PasteId>, FeedError> {
        let body = search_body(from, to);
        debug!(url = %self.url, body = %body, "Requesting daily pastes");

        let text = with_retry(&self.retry, FeedError::is_transient, || {
            self.request_once(&body)
        })
        .await?;

        let pastes = unwrap_batch(&text)?;
        debug!(count = pastes.len(), "Daily pastes received");
        Ok(pastes)
    }

    async fn request_once(&self, body: &str) -> Result<String, FeedError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(CACHE_CONTROL, "no-cache")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_GATEWAY {
            return Err(FeedError::BadGateway);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_today(&self) -> Result<Vec<PasteId>, FeedError> {
        FeedClient::fetch_today(self).await
    }
}

/// Form body for a date range. Day and month are not zero-padded.
pub fn search_body(from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "from={}.{}.{}&to={}.{}.{}",
        from.day(),
        from.month(),
        from.year(),
        to.day(),
        to.month(),
        to.year()
    )
}

/// Strip the outer array from a feed response and return the inner batch.
pub fn unwrap_batch(body: &str) -> Result<Vec<PasteId>, FeedError> {
    let mut outer: Vec<Vec<PasteId>> = serde_json::from_str(body)?;

    if outer.is_empty() {
        return Err(FeedError::EmptyEnvelope);
    }
    if outer.len() > 1 {
        warn!(
            batches = outer.len(),
            "Feed returned more than one batch, using the first"
        );
    }

    Ok(outer.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_body_is_not_zero_padded() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(search_body(day, day), "from=7.3.2024&to=7.3.2024");
    }

    #[test]
    fn test_search_body_range() {
        let from = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(search_body(from, to), "from=31.12.2023&to=1.1.2024");
    }

    #[test]
    fn test_unwrap_batch_preserves_order() {
        let body = r#"[[
            {"id": "a", "tags": "", "date": 1700000000},
            {"id": "b", "tags": "creds", "date": 1700000060}
        ]]"#;
        let pastes = unwrap_batch(body).unwrap();
        assert_eq!(
            pastes,
            vec![
                PasteId {
                    id: "a".to_string(),
                    tags: String::new(),
                    date: 1700000000
                },
                PasteId {
                    id: "b".to_string(),
                    tags: "creds".to_string(),
                    date: 1700000060
                },
            ]
        );
    }

    #[test]
    fn test_unwrap_batch_empty_day() {
        assert!(unwrap_batch("[[]]").unwrap().is_empty());
    }

    #[test]
    fn test_unwrap_batch_missing_tags_defaults_empty() {
        let pastes = unwrap_batch(r#"[[{"id": "x", "date": 1}]]"#).unwrap();
        assert_eq!(pastes[0].tags, "");
    }

    #[test]
    fn test_unwrap_batch_uses_first_of_several() {
        let pastes = unwrap_batch(r#"[[{"id": "x", "date": 1}], [{"id": "y", "date": 2}]]"#)
            .unwrap();
        assert_eq!(pastes.len(), 1);
        assert_eq!(pastes[0].id, "x");
    }

    #[test]
    fn test_unwrap_batch_empty_envelope() {
        assert!(matches!(unwrap_batch("[]"), Err(FeedError::EmptyEnvelope)));
    }

    #[test]
    fn test_unwrap_batch_wrong_shape_is_parse_error() {
        // Un-nested array: the contract changed
        let err = unwrap_batch(r#"[{"id": "a", "tags": "", "date": 1}]"#).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
        assert!(!err.is_transient());

        let err = unwrap_batch("<html>Bad gateway</html>").unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }
}
