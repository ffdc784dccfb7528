use crate::constants::{DEFAULT_EXPOSURE_TIMEOUT_MS, OPENWEATHER_AIR_POLLUTION_URL};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, ExposureReading};
use crate::services::ExposureOracle;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Exposure oracle backed by the OpenWeatherMap air-pollution API.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        OpenWeatherClient {
            client: Client::new(),
            api_key,
            base_url: OPENWEATHER_AIR_POLLUTION_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_EXPOSURE_TIMEOUT_MS),
        }
    }

    pub fn with_config(api_key: String, base_url: String, timeout: Duration) -> Self {
        OpenWeatherClient {
            client: Client::new(),
            api_key,
            base_url,
            timeout,
        }
    }

    pub async fn air_pollution(&self, point: &Coordinates) -> Result<ExposureReading> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ExposureApi("Request timed out".to_string())
                } else {
                    AppError::ExposureApi(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        tracing::debug!(
            status = %status,
            lat = point.lat,
            lng = point.lng,
            "OpenWeather air-pollution response"
        );

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExposureApi(format!("HTTP {}: {}", status, body)));
        }

        let payload: AirPollutionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExposureApi(format!("Failed to parse response: {}", e)))?;

        payload.into_reading(*point)
    }
}

#[async_trait]
impl ExposureOracle for OpenWeatherClient {
    async fn get_exposure(&self, point: &Coordinates) -> Result<ExposureReading> {
        self.air_pollution(point).await
    }
}

// OpenWeatherMap API response types

#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    #[serde(default)]
    list: Vec<AirPollutionEntry>,
}

impl AirPollutionResponse {
    fn into_reading(self, point: Coordinates) -> Result<ExposureReading> {
        let entry = self.list.into_iter().next().ok_or_else(|| {
            AppError::DataUnavailable("No pollution data found for this location".to_string())
        })?;

        ExposureReading::from_components(
            point,
            entry.components.pm2_5,
            entry.components.pm10,
            entry.main.and_then(|m| m.aqi),
        )
        .ok_or_else(|| {
            AppError::DataUnavailable(
                "Smog level data not available for this location".to_string(),
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    #[serde(default)]
    main: Option<AirQualityIndex>,
    #[serde(default)]
    components: Components,
}

#[derive(Debug, Deserialize)]
struct AirQualityIndex {
    aqi: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct Components {
    pm2_5: Option<f64>,
    pm10: Option<f64>,
}
