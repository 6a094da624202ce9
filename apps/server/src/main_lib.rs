use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use countrydata_core::countries::{CountryService, CountryServiceTrait};
use countrydata_core::refresh::{RefreshService, RefreshServiceTrait, UniformMultiplier};
use countrydata_core::status::{StatusService, StatusServiceTrait};
use countrydata_core::summary::SummaryImage;
use countrydata_feed::{CountriesClient, ExchangeRateClient};
use countrydata_storage_sqlite::{
    db::{self, write_actor},
    CountryRepository, StatusRepository,
};

pub struct AppState {
    pub country_service: Arc<dyn CountryServiceTrait>,
    pub status_service: Arc<dyn StatusServiceTrait>,
    pub refresh_service: Arc<dyn RefreshServiceTrait>,
    pub summary_image: Arc<SummaryImage>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("CD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let country_repository = Arc::new(CountryRepository::new(pool.clone(), writer.clone()));
    let status_repository = Arc::new(StatusRepository::new(pool.clone(), writer.clone()));

    let country_service: Arc<dyn CountryServiceTrait> =
        Arc::new(CountryService::new(country_repository.clone()));
    let status_service: Arc<dyn StatusServiceTrait> =
        Arc::new(StatusService::new(status_repository.clone()));

    let directory = Arc::new(CountriesClient::new(
        config.countries_api_url.clone(),
        config.api_timeout,
    ));
    let rates = Arc::new(ExchangeRateClient::new(
        config.exchange_rate_api_url.clone(),
        config.api_timeout,
    ));

    let summary_image = Arc::new(SummaryImage::new(&config.data_dir));
    let refresh_service: Arc<dyn RefreshServiceTrait> = Arc::new(RefreshService::new(
        directory,
        rates,
        country_repository,
        status_repository,
        Arc::new(UniformMultiplier),
        summary_image.clone(),
    ));

    Ok(Arc::new(AppState {
        country_service,
        status_service,
        refresh_service,
        summary_image,
        db_path,
    }))
}
