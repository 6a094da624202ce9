//! Client for the currency exchange-rate feed.

use async_trait::async_trait;
use log::info;
use reqwest::Client;
use std::time::Duration;

use crate::errors::FeedError;
use crate::models::RateTable;
use crate::provider::traits::ExchangeRateSource;

const SOURCE_NAME: &str = "exchange-rate feed";

/// Fetches the latest rate table from the configured feed endpoint.
pub struct ExchangeRateClient {
    client: Client,
    url: String,
}

impl ExchangeRateClient {
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

    async fn fetch(&self) -> Result<RateTable, FeedError> {
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

        let table: RateTable = response.json().await.map_err(|e| {
            if e.is_decode() {
                FeedError::InvalidPayload {
                    source_name: SOURCE_NAME.to_string(),
                    message: e.to_string(),
                }
            } else {
                FeedError::from_transport(SOURCE_NAME, e)
            }
        })?;

        info!(
            "Fetched exchange rates for {} currencies (base {})",
            table.rates.len(),
            table.base
        );
        Ok(table)
    }
}

#[async_trait]
impl ExchangeRateSource for ExchangeRateClient {
    async fn fetch_rates(&self) -> Result<RateTable, FeedError> {
        self.fetch().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_maps_to_network_error() {
        let client = ExchangeRateClient::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = client.fetch_rates().await.unwrap_err();
        assert!(matches!(
            err,
            FeedError::Network { .. } | FeedError::Transport { .. }
        ));
        assert_eq!(err.source_name(), "exchange-rate feed");
    }
}
