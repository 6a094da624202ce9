//! Feed clients and the source traits core consumes.

pub mod countries_api;
pub mod exchange_rate_api;
pub mod traits;

pub use countries_api::CountriesClient;
pub use exchange_rate_api::ExchangeRateClient;
pub use traits::{CountryDirectorySource, ExchangeRateSource};
