//! External data clients for the country aggregation service.
//!
//! This crate talks to the two upstream feeds (the countries directory and
//! the currency exchange-rate table) and converts their JSON payloads into
//! explicit wire-shape structs. Transport failures are translated into the
//! typed [`FeedError`] taxonomy at this boundary; nothing downstream sees a
//! raw `reqwest` error.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::FeedError;
pub use models::{CountryEntry, CurrencyEntry, RateTable};
pub use provider::{
    CountriesClient, CountryDirectorySource, ExchangeRateClient, ExchangeRateSource,
};
