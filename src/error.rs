use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("No routes found")]
    NoRoutesFound,

    #[error("Routing provider returned HTTP {status}: {body}")]
    ProviderError { status: u16, body: String },

    #[error("Mapbox API error: {0}")]
    MapboxApi(String),

    #[error("No pollution data available: {0}")]
    DataUnavailable(String),

    #[error("Pollution API error: {0}")]
    ExposureApi(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::LocationNotFound(ref place) => {
                tracing::info!("Geocoding found no match for '{}'", place);
                (
                    StatusCode::NOT_FOUND,
                    format!("Location not found: {}", place),
                )
            }
            AppError::NoRoutesFound => (StatusCode::NOT_FOUND, "No routes found".to_string()),
            AppError::ProviderError { status, ref body } => {
                tracing::error!(status, "Routing provider error: {}", body);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Failed to fetch routes (provider status {})", status),
                )
            }
            AppError::MapboxApi(ref e) => {
                tracing::error!("Mapbox API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error".to_string())
            }
            AppError::DataUnavailable(ref e) => (StatusCode::NOT_FOUND, e.clone()),
            AppError::ExposureApi(ref e) => {
                tracing::error!("Pollution API error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to fetch pollution data".to_string(),
                )
            }
            AppError::Cache(ref e) => {
                tracing::warn!("Cache error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Cache error".to_string())
            }
            AppError::NotFound(ref e) => (StatusCode::NOT_FOUND, e.clone()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::LocationNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::NoRoutesFound, StatusCode::NOT_FOUND),
            (
                AppError::ProviderError {
                    status: 401,
                    body: "unauthorized".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::DataUnavailable("x".into()), StatusCode::NOT_FOUND),
            (AppError::ExposureApi("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
