use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::ranking::SmogPoint;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Query parameters for a single-point air quality lookup
#[derive(Debug, Deserialize)]
pub struct AqiQueryParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl AqiQueryParams {
    pub fn validate(&self) -> Result<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng).map_err(AppError::InvalidRequest),
            _ => Err(AppError::InvalidRequest(
                "Missing lat or lng in query params".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AqiLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiResponse {
    pub location: AqiLocation,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub smog_level: f64,
    pub aqi_level: Option<u8>,
}

/// GET /aqi?lat=..&lng=.. - Air quality at one point
pub async fn get_aqi(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AqiQueryParams>,
) -> Result<Json<AqiResponse>> {
    let point = params.validate()?;
    let reading = state.exposure.get_exposure(&point).await?;

    Ok(Json(AqiResponse {
        location: AqiLocation {
            lat: point.lat,
            lng: point.lng,
        },
        pm25: reading.pm25,
        pm10: reading.pm10,
        smog_level: reading.smog_level,
        aqi_level: reading.aqi_level,
    }))
}

/// POST /smog-variation - Jitter a flat series of smog levels
pub async fn smog_variation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<SmogPoint>>> {
    let invalid = || AppError::InvalidRequest("Invalid input. Expected array of objects.".to_string());

    match body.as_array() {
        Some(items) if !items.is_empty() => {}
        _ => return Err(invalid()),
    }

    let points: Vec<SmogPoint> = serde_json::from_value(body).map_err(|e| {
        AppError::InvalidRequest(format!(
            "Invalid input. Every object needs a numeric smogLevel: {}",
            e
        ))
    })?;

    Ok(Json(state.smog_variation.vary(points)))
}
