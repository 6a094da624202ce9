pub mod countries_service;
pub mod countries_traits;
pub mod country_model;

pub use countries_service::{CountryService, CountryServiceTrait};
pub use countries_traits::CountryRepositoryTrait;
pub use country_model::{Country, CountryFilters, CountrySort, TopCountry};
