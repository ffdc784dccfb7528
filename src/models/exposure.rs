use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Weight of fine particulate matter in the smog level
pub const PM25_SMOG_FACTOR: f64 = 0.7;
/// Weight of coarse particulate matter in the smog level
pub const PM10_SMOG_FACTOR: f64 = 0.3;

/// Air-quality reading at a single coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExposureReading {
    pub location: Coordinates,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    /// Particulate-derived scalar used for scoring
    pub smog_level: f64,
    /// Provider AQI index (1-5), when reported
    pub aqi_level: Option<u8>,
}

impl ExposureReading {
    /// Derive a reading from particulate components. A single missing
    /// component counts as zero; returns `None` when both are missing.
    pub fn from_components(
        location: Coordinates,
        pm25: Option<f64>,
        pm10: Option<f64>,
        aqi_level: Option<u8>,
    ) -> Option<Self> {
        if pm25.is_none() && pm10.is_none() {
            return None;
        }

        let smog_level =
            pm25.unwrap_or(0.0) * PM25_SMOG_FACTOR + pm10.unwrap_or(0.0) * PM10_SMOG_FACTOR;

        Some(ExposureReading {
            location,
            pm25,
            pm10,
            smog_level,
            aqi_level,
        })
    }
}
