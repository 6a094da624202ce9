use countrydata_core::countries::{
    Country, CountryFilters, CountryRepositoryTrait, CountrySort, TopCountry,
};
use countrydata_core::errors::Result;

use super::model::{CountryDB, TopCountryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::countries;
use crate::schema::countries::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct CountryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CountryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CountryRepository { pool, writer }
    }

    pub fn list_impl(&self, filters: &CountryFilters) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = countries::table.into_boxed();
        if let Some(ref wanted_region) = filters.region {
            query = query.filter(region.eq(wanted_region.clone()));
        }
        // Region and currency are exact matches, like the upstream values.
        if let Some(ref wanted_currency) = filters.currency {
            query = query.filter(currency_code.eq(wanted_currency.clone()));
        }
        query = match filters.sort {
            // NULL outputs sort last regardless of direction.
            CountrySort::OutputDesc => query
                .order((estimated_output.is_null().asc(), estimated_output.desc())),
            CountrySort::OutputAsc => query
                .order((estimated_output.is_null().asc(), estimated_output.asc())),
            CountrySort::PopulationDesc => query.order(population.desc()),
            CountrySort::PopulationAsc => query.order(population.asc()),
            CountrySort::NameAsc => query.order(name.asc()),
        };

        let rows = query
            .load::<CountryDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(Country::try_from).collect()
    }

    pub fn get_by_name_impl(&self, country_name: &str) -> Result<Option<Country>> {
        let mut conn = get_connection(&self.pool)?;
        // The name column is declared COLLATE NOCASE, so equality here is
        // case-insensitive.
        let row = countries
            .filter(name.eq(country_name))
            .first::<CountryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Country::try_from).transpose()
    }

    pub fn top_by_output_impl(&self, limit: i64) -> Result<Vec<TopCountry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = countries
            .filter(estimated_output.is_not_null())
            .order(estimated_output.desc())
            .limit(limit)
            .select((name, estimated_output))
            .load::<TopCountryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(TopCountry::from).collect())
    }
}

#[async_trait]
impl CountryRepositoryTrait for CountryRepository {
    fn list(&self, filters: &CountryFilters) -> Result<Vec<Country>> {
        self.list_impl(filters)
    }

    fn get_by_name(&self, country_name: &str) -> Result<Option<Country>> {
        self.get_by_name_impl(country_name)
    }

    async fn upsert(&self, country: Country) -> Result<Country> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Country> {
                let country_db = CountryDB::from(country);
                let result_db = diesel::insert_into(countries::table)
                    .values(&country_db)
                    .on_conflict(name)
                    .do_update()
                    .set(&country_db)
                    .returning(CountryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Country::try_from(result_db)
            })
            .await
    }

    async fn delete_by_name(&self, country_name: &str) -> Result<bool> {
        let owned_name = country_name.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::delete(countries.filter(name.eq(owned_name)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected > 0)
            })
            .await
    }

    fn top_by_output(&self, limit: i64) -> Result<Vec<TopCountry>> {
        self.top_by_output_impl(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (CountryRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        let repo = CountryRepository::new(Arc::clone(&pool), writer);
        (repo, temp_dir)
    }

    fn sample_country(country_name: &str) -> Country {
        Country {
            name: country_name.to_string(),
            capital: Some("Capital City".to_string()),
            region: Some("Europe".to_string()),
            population: 10_000_000,
            currency_code: Some("EUR".to_string()),
            exchange_rate: Some(dec!(0.92)),
            estimated_output: Some(dec!(15000000000.00)),
            flag_url: Some("https://flags.example/eu.svg".to_string()),
            last_refreshed_at: Utc.with_ymd_and_hms(2026, 8, 20, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let (repo, _tmp) = create_test_repository().await;

        let inserted = repo.upsert(sample_country("France")).await.unwrap();
        assert_eq!(inserted.name, "France");
        assert_eq!(inserted.population, 10_000_000);

        let mut updated = sample_country("France");
        updated.population = 11_000_000;
        updated.exchange_rate = Some(dec!(0.95));
        let saved = repo.upsert(updated).await.unwrap();
        assert_eq!(saved.population, 11_000_000);

        let all = repo.list(&CountryFilters::default()).unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_get_and_delete_are_case_insensitive() {
        let (repo, _tmp) = create_test_repository().await;
        repo.upsert(sample_country("France")).await.unwrap();

        let found = repo.get_by_name("FRANCE").unwrap();
        assert_eq!(found.unwrap().name, "France");
        assert!(repo.get_by_name("Atlantis").unwrap().is_none());

        assert!(repo.delete_by_name("fRaNcE").await.unwrap());
        assert!(!repo.delete_by_name("France").await.unwrap());
        assert!(repo.get_by_name("France").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_same_name_different_case_overwrites() {
        let (repo, _tmp) = create_test_repository().await;
        repo.upsert(sample_country("France")).await.unwrap();

        let mut lowercased = sample_country("france");
        lowercased.population = 12_000_000;
        repo.upsert(lowercased).await.unwrap();

        let all = repo.list(&CountryFilters::default()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].population, 12_000_000);
    }

    #[tokio::test]
    async fn test_list_filters_by_region_and_currency() {
        let (repo, _tmp) = create_test_repository().await;

        let mut brazil = sample_country("Brazil");
        brazil.region = Some("Americas".to_string());
        brazil.currency_code = Some("BRL".to_string());
        repo.upsert(brazil).await.unwrap();
        repo.upsert(sample_country("France")).await.unwrap();
        repo.upsert(sample_country("Germany")).await.unwrap();

        let filters = CountryFilters {
            region: Some("Europe".to_string()),
            ..Default::default()
        };
        let europe = repo.list(&filters).unwrap();
        assert_eq!(europe.len(), 2);

        // Currency is an exact match on the stored code.
        let filters = CountryFilters {
            currency: Some("BRL".to_string()),
            ..Default::default()
        };
        let brl = repo.list(&filters).unwrap();
        assert_eq!(brl.len(), 1);
        assert_eq!(brl[0].name, "Brazil");

        let filters = CountryFilters {
            currency: Some("brl".to_string()),
            ..Default::default()
        };
        assert!(repo.list(&filters).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_sort_orders() {
        let (repo, _tmp) = create_test_repository().await;

        let mut small = sample_country("Andorra");
        small.population = 80_000;
        small.estimated_output = Some(dec!(50000000.00));
        repo.upsert(small).await.unwrap();

        let mut no_output = sample_country("Nowhere");
        no_output.population = 5_000_000;
        no_output.currency_code = None;
        no_output.exchange_rate = None;
        no_output.estimated_output = None;
        repo.upsert(no_output).await.unwrap();

        repo.upsert(sample_country("France")).await.unwrap();

        let filters = CountryFilters {
            sort: CountrySort::OutputDesc,
            ..Default::default()
        };
        let by_output = repo.list(&filters).unwrap();
        let names: Vec<&str> = by_output.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France", "Andorra", "Nowhere"]);

        let filters = CountryFilters {
            sort: CountrySort::PopulationAsc,
            ..Default::default()
        };
        let by_population = repo.list(&filters).unwrap();
        assert_eq!(by_population[0].name, "Andorra");
        assert_eq!(by_population[2].name, "France");
    }

    #[tokio::test]
    async fn test_upsert_clears_fields_gone_null() {
        let (repo, _tmp) = create_test_repository().await;
        repo.upsert(sample_country("France")).await.unwrap();

        // The currency disappeared upstream: every derived field must be
        // overwritten with NULL, not left at its previous value.
        let mut delisted = sample_country("France");
        delisted.capital = None;
        delisted.currency_code = None;
        delisted.exchange_rate = None;
        delisted.estimated_output = None;
        delisted.flag_url = None;
        repo.upsert(delisted).await.unwrap();

        let stored = repo.get_by_name("France").unwrap().unwrap();
        assert_eq!(stored.capital, None);
        assert_eq!(stored.currency_code, None);
        assert_eq!(stored.exchange_rate, None);
        assert_eq!(stored.estimated_output, None);
        assert_eq!(stored.flag_url, None);
    }

    #[tokio::test]
    async fn test_null_currency_round_trips() {
        let (repo, _tmp) = create_test_repository().await;

        let mut unmatched = sample_country("Nowhere");
        unmatched.currency_code = None;
        unmatched.exchange_rate = None;
        unmatched.estimated_output = None;
        repo.upsert(unmatched).await.unwrap();

        let loaded = repo.get_by_name("Nowhere").unwrap().unwrap();
        assert!(loaded.currency_code.is_none());
        assert!(loaded.exchange_rate.is_none());
        assert!(loaded.estimated_output.is_none());
    }

    #[tokio::test]
    async fn test_top_by_output_skips_null_and_limits() {
        let (repo, _tmp) = create_test_repository().await;

        for (country_name, output) in [
            ("France", Some(dec!(300.00))),
            ("Germany", Some(dec!(500.00))),
            ("Andorra", Some(dec!(10.00))),
            ("Nowhere", None),
        ] {
            let mut country = sample_country(country_name);
            country.estimated_output = output;
            repo.upsert(country).await.unwrap();
        }

        let top = repo.top_by_output(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Germany");
        assert_eq!(top[0].estimated_output, dec!(500.00));
        assert_eq!(top[1].name, "France");
    }
}
