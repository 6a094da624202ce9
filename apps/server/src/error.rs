use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use countrydata_core::errors::{DatabaseError, Error};
use serde_json::json;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// HTTP-facing error wrapper.
///
/// Status mapping: feed failures are 503 (the service itself is fine, an
/// upstream is not), missing records are 404, bad input is 400, everything
/// else is 500. The body shape is always `{error, details?}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Core(Error),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Core(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, json!({ "error": message }))
            }
            ApiError::Core(Error::Feed(feed_err)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "External data source unavailable",
                    "details": feed_err.to_string(),
                }),
            ),
            ApiError::Core(Error::Database(DatabaseError::NotFound(message))) => {
                (StatusCode::NOT_FOUND, json!({ "error": message }))
            }
            ApiError::Core(Error::Validation(validation_err)) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": validation_err.to_string() }),
            ),
            ApiError::Core(err) => {
                tracing::error!("Internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal server error",
                        "details": err.to_string(),
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
