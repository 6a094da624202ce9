use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use countrydata_core::countries::{Country, CountryFilters, CountrySort};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Default)]
struct ListParams {
    region: Option<String>,
    currency: Option<String>,
    sort: Option<String>,
}

impl From<ListParams> for CountryFilters {
    fn from(params: ListParams) -> Self {
        CountryFilters {
            region: params.region,
            currency: params.currency,
            sort: CountrySort::parse(params.sort.as_deref()),
        }
    }
}

async fn refresh_countries(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let summary = state.refresh_service.refresh_countries().await?;
    Ok(Json(json!({
        "message": "Countries refreshed successfully",
        "total_countries": summary.total_countries,
        "last_refreshed_at": summary.last_refreshed_at,
    })))
}

async fn list_countries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Country>>> {
    let countries = state.country_service.get_countries(&params.into())?;
    Ok(Json(countries))
}

async fn get_country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Country>> {
    match state.country_service.get_country_by_name(&name)? {
        Some(country) => Ok(Json(country)),
        None => Err(crate::error::ApiError::not_found(format!(
            "Country '{}' not found",
            name
        ))),
    }
}

async fn delete_country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    if state.country_service.delete_country(&name).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(crate::error::ApiError::not_found(format!(
            "Country '{}' not found",
            name
        )))
    }
}

/// Serves the PNG written by the last refresh, if any.
async fn summary_image(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    if !state.summary_image.exists() {
        return Err(crate::error::ApiError::not_found(
            "Summary image not generated yet, run a refresh first",
        ));
    }
    let bytes = tokio::fs::read(state.summary_image.path())
        .await
        .map_err(countrydata_core::errors::Error::from)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/countries/refresh", post(refresh_countries))
        .route("/countries", get(list_countries))
        .route("/countries/image", get(summary_image))
        .route("/countries/{name}", get(get_country).delete(delete_country))
}
