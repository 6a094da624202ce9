use async_trait::async_trait;

use crate::countries::{Country, CountryFilters, TopCountry};
use crate::errors::Result;

/// Storage contract for country records.
///
/// Reads go straight to the pool; writes go through the storage layer's
/// single-writer path. Name matching is case-insensitive everywhere (the
/// storage layer normalizes via collation).
#[async_trait]
pub trait CountryRepositoryTrait: Send + Sync {
    fn list(&self, filters: &CountryFilters) -> Result<Vec<Country>>;

    fn get_by_name(&self, name: &str) -> Result<Option<Country>>;

    /// Idempotent upsert keyed by name; re-processing an existing name
    /// overwrites all mutable fields and refreshes the timestamp.
    async fn upsert(&self, country: Country) -> Result<Country>;

    /// Returns whether a record existed and was removed.
    async fn delete_by_name(&self, name: &str) -> Result<bool>;

    /// Countries with a non-null estimated output, highest first.
    fn top_by_output(&self, limit: i64) -> Result<Vec<TopCountry>>;
}
