//! Client for the public countries directory.

use async_trait::async_trait;
use log::info;
use reqwest::Client;
use std::time::Duration;

use crate::errors::FeedError;
use crate::models::CountryEntry;
use crate::provider::traits::CountryDirectorySource;

/// Source name used in error reporting.
const SOURCE_NAME: &str = "countries directory";

/// Fetches the full country list from the configured directory endpoint.
pub struct CountriesClient {
    client: Client,
    url: String,
}

impl CountriesClient {
    /// Create a client with the given endpoint URL and request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<Vec<CountryEntry>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::from_transport(SOURCE_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UpstreamStatus {
                source_name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let entries: Vec<CountryEntry> = response.json().await.map_err(|e| {
            if e.is_decode() {
                FeedError::InvalidPayload {
                    source_name: SOURCE_NAME.to_string(),
                    message: e.to_string(),
                }
            } else {
                FeedError::from_transport(SOURCE_NAME, e)
            }
        })?;

        info!("Fetched {} countries from {}", entries.len(), SOURCE_NAME);
        Ok(entries)
    }
}

#[async_trait]
impl CountryDirectorySource for CountriesClient {
    async fn fetch_countries(&self) -> Result<Vec<CountryEntry>, FeedError> {
        self.fetch().await
    }
}
