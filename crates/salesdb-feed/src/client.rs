//! HTTP client for the product transaction feed.
//!
//! Wraps `reqwest` with feed-specific status and decoding errors. The feed is
//! a single static JSON document, so there is no pagination and no retry.

use std::time::Duration;

use reqwest::{Client, Url};
use salesdb_core::{AppConfig, NewProduct};

use crate::error::FeedError;
use crate::normalize::normalize_transaction;
use crate::types::FeedTransaction;

/// Client for the product transaction feed.
///
/// Use [`FeedClient::from_app_config`] in the binaries or [`FeedClient::new`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    url: Url,
}

impl FeedClient {
    /// Creates a client for the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] if `url` does not parse, or
    /// [`FeedError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            url: parsed,
        })
    }

    /// Creates a client from the `SALESDB_FEED_*` settings.
    ///
    /// # Errors
    ///
    /// See [`FeedClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, FeedError> {
        Self::new(
            &config.feed_url,
            config.feed_timeout_secs,
            &config.feed_user_agent,
        )
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Downloads the feed and returns the raw transactions in feed order.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure.
    /// - [`FeedError::UnexpectedStatus`] on a non-2xx response.
    /// - [`FeedError::Deserialize`] if the body is not a JSON array of
    ///   transactions.
    pub async fn fetch_transactions(&self) -> Result<Vec<FeedTransaction>, FeedError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
            context: self.url.to_string(),
            source: e,
        })
    }

    /// Downloads the feed and normalizes every transaction for storage.
    ///
    /// # Errors
    ///
    /// Everything [`FeedClient::fetch_transactions`] returns, plus
    /// [`FeedError::Normalization`] for the first transaction that cannot be
    /// normalized.
    pub async fn fetch_products(&self) -> Result<Vec<NewProduct>, FeedError> {
        let transactions = self.fetch_transactions().await?;
        tracing::debug!(count = transactions.len(), url = %self.url, "fetched feed transactions");

        transactions
            .into_iter()
            .map(normalize_transaction)
            .collect()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
