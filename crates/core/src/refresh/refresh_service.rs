//! End-to-end refresh cycle: fetch both feeds concurrently, merge, persist
//! with per-record failure tolerance, update the status singleton, then
//! kick off the best-effort summary image.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::countries::CountryRepositoryTrait;
use crate::errors::{Error, Result};
use crate::refresh::merge::{merge_entries, OutputMultiplier};
use crate::status::StatusRepositoryTrait;
use crate::summary::SummaryImage;
use countrydata_feed::{CountryDirectorySource, ExchangeRateSource};

/// How many countries feed the summary image.
const SUMMARY_TOP_N: i64 = 5;
/// Progress log cadence during the upsert loop.
const PROGRESS_EVERY: usize = 50;

/// Outcome of one refresh cycle.
#[derive(Serialize, Debug, Clone)]
pub struct RefreshSummary {
    pub total_countries: i64,
    pub last_refreshed_at: DateTime<Utc>,
}

#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    /// Runs one full refresh cycle. A feed failure aborts before any write;
    /// individual upsert failures are tolerated and excluded from the count.
    async fn refresh_countries(&self) -> Result<RefreshSummary>;
}

pub struct RefreshService {
    directory: Arc<dyn CountryDirectorySource>,
    rates: Arc<dyn ExchangeRateSource>,
    country_repository: Arc<dyn CountryRepositoryTrait>,
    status_repository: Arc<dyn StatusRepositoryTrait>,
    multiplier: Arc<dyn OutputMultiplier>,
    summary_image: Arc<SummaryImage>,
}

impl RefreshService {
    pub fn new(
        directory: Arc<dyn CountryDirectorySource>,
        rates: Arc<dyn ExchangeRateSource>,
        country_repository: Arc<dyn CountryRepositoryTrait>,
        status_repository: Arc<dyn StatusRepositoryTrait>,
        multiplier: Arc<dyn OutputMultiplier>,
        summary_image: Arc<SummaryImage>,
    ) -> Self {
        RefreshService {
            directory,
            rates,
            country_repository,
            status_repository,
            multiplier,
            summary_image,
        }
    }

    /// Fire-and-forget image generation; observed for logging only.
    fn spawn_summary_task(&self, saved_count: i64, refreshed_at: Option<DateTime<Utc>>) {
        let repository = self.country_repository.clone();
        let summary_image = self.summary_image.clone();
        tokio::spawn(async move {
            let result = repository
                .top_by_output(SUMMARY_TOP_N)
                .and_then(|top| summary_image.render(saved_count, &top, refreshed_at));
            if let Err(e) = result {
                warn!("Failed to generate summary image: {}", e);
            }
        });
    }
}

#[async_trait]
impl RefreshServiceTrait for RefreshService {
    async fn refresh_countries(&self) -> Result<RefreshSummary> {
        // Both fetches run concurrently; the first failure aborts the cycle
        // before anything is written.
        let (entries, rate_table) = tokio::try_join!(
            async { self.directory.fetch_countries().await.map_err(Error::Feed) },
            async { self.rates.fetch_rates().await.map_err(Error::Feed) },
        )?;

        let merged = merge_entries(entries, &rate_table, self.multiplier.as_ref(), Utc::now());
        let total = merged.len();
        info!("Merged {} countries, persisting", total);

        let mut saved = 0usize;
        for country in merged {
            let name = country.name.clone();
            match self.country_repository.upsert(country).await {
                Ok(_) => {
                    saved += 1;
                    if saved % PROGRESS_EVERY == 0 {
                        info!("Progress: {}/{} countries saved", saved, total);
                    }
                }
                Err(e) => error!("Failed to save {}: {}", name, e),
            }
        }
        info!("Saved {}/{} countries", saved, total);

        // A status-update failure is fatal to the refresh response.
        let status = self.status_repository.update_status(saved as i64).await?;

        self.spawn_summary_task(saved as i64, status.last_refreshed_at);

        Ok(RefreshSummary {
            total_countries: status.total_countries,
            last_refreshed_at: status.last_refreshed_at.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::{Country, CountryFilters, TopCountry};
    use crate::refresh::FixedMultiplier;
    use crate::status::RefreshStatus;
    use countrydata_feed::{CountryEntry, FeedError, RateTable};
    use rust_decimal_macros::dec;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use tempfile::tempdir;

    struct FakeDirectory {
        entries: Vec<CountryEntry>,
    }

    #[async_trait]
    impl CountryDirectorySource for FakeDirectory {
        async fn fetch_countries(&self) -> std::result::Result<Vec<CountryEntry>, FeedError> {
            Ok(self.entries.clone())
        }
    }

    struct FakeRates {
        result: std::result::Result<RateTable, ()>,
    }

    #[async_trait]
    impl ExchangeRateSource for FakeRates {
        async fn fetch_rates(&self) -> std::result::Result<RateTable, FeedError> {
            match &self.result {
                Ok(table) => Ok(table.clone()),
                Err(_) => Err(FeedError::Timeout {
                    source_name: "exchange-rate feed".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct InMemoryCountryRepo {
        records: Mutex<HashMap<String, Country>>,
        fail_for: HashSet<String>,
    }

    #[async_trait]
    impl CountryRepositoryTrait for InMemoryCountryRepo {
        fn list(&self, _filters: &CountryFilters) -> Result<Vec<Country>> {
            Ok(self.records.lock().unwrap().values().cloned().collect())
        }

        fn get_by_name(&self, name: &str) -> Result<Option<Country>> {
            Ok(self.records.lock().unwrap().get(&name.to_lowercase()).cloned())
        }

        async fn upsert(&self, country: Country) -> Result<Country> {
            if self.fail_for.contains(&country.name) {
                return Err(Error::Repository("simulated write failure".to_string()));
            }
            self.records
                .lock()
                .unwrap()
                .insert(country.name.to_lowercase(), country.clone());
            Ok(country)
        }

        async fn delete_by_name(&self, name: &str) -> Result<bool> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .remove(&name.to_lowercase())
                .is_some())
        }

        fn top_by_output(&self, limit: i64) -> Result<Vec<TopCountry>> {
            let mut top: Vec<TopCountry> = self
                .records
                .lock()
                .unwrap()
                .values()
                .filter_map(|c| {
                    c.estimated_output.map(|output| TopCountry {
                        name: c.name.clone(),
                        estimated_output: output,
                    })
                })
                .collect();
            top.sort_by(|a, b| b.estimated_output.cmp(&a.estimated_output));
            top.truncate(limit as usize);
            Ok(top)
        }
    }

    #[derive(Default)]
    struct InMemoryStatusRepo {
        status: Mutex<Option<RefreshStatus>>,
    }

    #[async_trait]
    impl StatusRepositoryTrait for InMemoryStatusRepo {
        fn get_status(&self) -> Result<RefreshStatus> {
            Ok(self.status.lock().unwrap().clone().unwrap_or_default())
        }

        async fn update_status(&self, total_countries: i64) -> Result<RefreshStatus> {
            let status = RefreshStatus {
                total_countries,
                last_refreshed_at: Some(Utc::now()),
            };
            *self.status.lock().unwrap() = Some(status.clone());
            Ok(status)
        }
    }

    fn entry(name: &str, population: i64, code: Option<&str>) -> CountryEntry {
        let json = match code {
            Some(c) => format!(
                r#"{{"name": "{name}", "population": {population},
                     "currencies": [{{"code": "{c}", "name": null, "symbol": null}}]}}"#
            ),
            None => format!(r#"{{"name": "{name}", "population": {population}}}"#),
        };
        serde_json::from_str(&json).unwrap()
    }

    fn rates(pairs: &[(&str, rust_decimal::Decimal)]) -> RateTable {
        RateTable {
            base: "USD".to_string(),
            rates: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn service(
        entries: Vec<CountryEntry>,
        rate_result: std::result::Result<RateTable, ()>,
        repo: Arc<InMemoryCountryRepo>,
        status: Arc<InMemoryStatusRepo>,
        image_dir: &std::path::Path,
    ) -> RefreshService {
        RefreshService::new(
            Arc::new(FakeDirectory { entries }),
            Arc::new(FakeRates {
                result: rate_result,
            }),
            repo,
            status,
            Arc::new(FixedMultiplier(dec!(1500))),
            Arc::new(SummaryImage::new(image_dir)),
        )
    }

    #[tokio::test]
    async fn test_happy_path_persists_all_and_updates_status() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryCountryRepo::default());
        let status = Arc::new(InMemoryStatusRepo::default());
        let svc = service(
            vec![
                entry("Aland", 1_000_000, Some("ABC")),
                entry("Bland", 2_000_000, None),
            ],
            Ok(rates(&[("ABC", dec!(2.0))])),
            repo.clone(),
            status.clone(),
            dir.path(),
        );

        let summary = svc.refresh_countries().await.unwrap();
        assert_eq!(summary.total_countries, 2);

        let stored = repo.get_by_name("aland").unwrap().unwrap();
        assert_eq!(stored.estimated_output, Some(dec!(750000000.00)));
        let stored = repo.get_by_name("BLAND").unwrap().unwrap();
        assert_eq!(stored.currency_code, None);
        assert_eq!(stored.estimated_output, None);

        assert_eq!(status.get_status().unwrap().total_countries, 2);
    }

    #[tokio::test]
    async fn test_rate_source_failure_aborts_before_any_write() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryCountryRepo::default());
        let status = Arc::new(InMemoryStatusRepo::default());
        let svc = service(
            vec![entry("Aland", 1_000_000, Some("ABC"))],
            Err(()),
            repo.clone(),
            status.clone(),
            dir.path(),
        );

        let err = svc.refresh_countries().await.unwrap_err();
        assert!(matches!(err, Error::Feed(FeedError::Timeout { .. })));
        assert!(repo.records.lock().unwrap().is_empty());
        // Status singleton untouched: still the zero state.
        assert_eq!(status.get_status().unwrap(), RefreshStatus::default());
    }

    #[tokio::test]
    async fn test_partial_persistence_failures_are_tolerated() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryCountryRepo {
            records: Mutex::new(HashMap::new()),
            fail_for: HashSet::from(["Bland".to_string()]),
        });
        let status = Arc::new(InMemoryStatusRepo::default());
        let svc = service(
            vec![
                entry("Aland", 100, Some("ABC")),
                entry("Bland", 200, Some("ABC")),
                entry("Cland", 300, None),
            ],
            Ok(rates(&[("ABC", dec!(2.0))])),
            repo.clone(),
            status.clone(),
            dir.path(),
        );

        let summary = svc.refresh_countries().await.unwrap();
        // 3 attempted, 1 failed: count reflects 2 everywhere.
        assert_eq!(summary.total_countries, 2);
        assert_eq!(status.get_status().unwrap().total_countries, 2);
        assert!(repo.get_by_name("Bland").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_refresh_reports_status_timestamp() {
        let dir = tempdir().unwrap();
        let repo = Arc::new(InMemoryCountryRepo::default());
        let status = Arc::new(InMemoryStatusRepo::default());
        let svc = service(
            vec![entry("Aland", 100, None)],
            Ok(rates(&[])),
            repo,
            status.clone(),
            dir.path(),
        );

        let before = Utc::now();
        let summary = svc.refresh_countries().await.unwrap();
        assert!(summary.last_refreshed_at >= before);
        assert_eq!(
            status.get_status().unwrap().last_refreshed_at,
            Some(summary.last_refreshed_at)
        );
    }
}
