use std::sync::Arc;

use axum::{
    extract::OriginalUri,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::main_lib::AppState;

pub mod countries;
pub mod status;

/// Static service description served at the root (discovery aid).
async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "countrydata",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /countries/refresh": "Fetch countries and exchange rates, merge and persist",
            "GET /countries": "List countries (filters: region, currency; sort: gdp_desc, gdp_asc, population_desc, population_asc)",
            "GET /countries/image": "Summary image of the latest refresh",
            "GET /countries/{name}": "Fetch a single country by name",
            "DELETE /countries/{name}": "Delete a country by name",
            "GET /status": "Total countries and last refresh timestamp",
        },
    }))
}

async fn fallback(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
        })),
    )
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(countries::router())
        .merge(status::router())
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
