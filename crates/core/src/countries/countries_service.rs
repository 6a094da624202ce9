use async_trait::async_trait;
use std::sync::Arc;

use crate::countries::{Country, CountryFilters, CountryRepositoryTrait, TopCountry};
use crate::errors::Result;

/// Read/delete accessors over the country store.
#[async_trait]
pub trait CountryServiceTrait: Send + Sync {
    fn get_countries(&self, filters: &CountryFilters) -> Result<Vec<Country>>;

    fn get_country_by_name(&self, name: &str) -> Result<Option<Country>>;

    async fn delete_country(&self, name: &str) -> Result<bool>;

    fn get_top_by_output(&self, limit: i64) -> Result<Vec<TopCountry>>;
}

pub struct CountryService {
    repository: Arc<dyn CountryRepositoryTrait>,
}

impl CountryService {
    pub fn new(repository: Arc<dyn CountryRepositoryTrait>) -> Self {
        CountryService { repository }
    }
}

#[async_trait]
impl CountryServiceTrait for CountryService {
    fn get_countries(&self, filters: &CountryFilters) -> Result<Vec<Country>> {
        self.repository.list(filters)
    }

    fn get_country_by_name(&self, name: &str) -> Result<Option<Country>> {
        self.repository.get_by_name(name)
    }

    async fn delete_country(&self, name: &str) -> Result<bool> {
        self.repository.delete_by_name(name).await
    }

    fn get_top_by_output(&self, limit: i64) -> Result<Vec<TopCountry>> {
        self.repository.top_by_output(limit)
    }
}
