use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use countrydata_core::status::RefreshStatus;

async fn get_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<RefreshStatus>> {
    let status = state.status_service.get_status()?;
    Ok(Json(status))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}
