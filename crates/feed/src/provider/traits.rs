//! Source traits implemented by the concrete feed clients.
//!
//! The refresh pipeline depends on these rather than on the clients so it
//! can be exercised with in-memory fakes.

use async_trait::async_trait;

use crate::errors::FeedError;
use crate::models::{CountryEntry, RateTable};

/// Read-only source of the country directory.
#[async_trait]
pub trait CountryDirectorySource: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<CountryEntry>, FeedError>;
}

/// Read-only source of the currency-rate table.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable, FeedError>;
}
