use super::conditions::{estimators_for, TrafficEstimator, WeatherEstimator};
use crate::config::RankingConfig;
use crate::constants::{SMOG_WEIGHT_BUCKETS, SMOG_WEIGHT_CEILING};
use crate::models::Coordinates;
use std::sync::Arc;

/// Bucket a raw smog level into a weight from 1 to 6. Bucket bounds are
/// inclusive, so a level sitting on a bound takes the lower weight.
pub fn smog_weight(level: f64) -> u8 {
    SMOG_WEIGHT_BUCKETS
        .iter()
        .find(|(upper, _)| level <= *upper)
        .map(|(_, weight)| *weight)
        .unwrap_or(SMOG_WEIGHT_CEILING)
}

/// Per-route aggregation of the sample point contributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub smog_total: f64,
    pub traffic_total: f64,
    pub weather_total: f64,
    /// Sample points that fell back to the neutral smog weight
    pub neutral_points: usize,
    /// `max(1, path length)`
    pub segment_count: usize,
    pub distance_km: f64,
    /// Composite score, unrounded
    pub total: f64,
}

/// Turns exposure readings and route distance into one composite score.
pub struct ScoringPolicy {
    w_smog: f64,
    w_traffic: f64,
    w_weather: f64,
    w_distance: f64,
    neutral_smog_weight: f64,
    traffic: Arc<dyn TrafficEstimator>,
    weather: Arc<dyn WeatherEstimator>,
}

impl ScoringPolicy {
    pub fn new(
        config: &RankingConfig,
        traffic: Arc<dyn TrafficEstimator>,
        weather: Arc<dyn WeatherEstimator>,
    ) -> Self {
        ScoringPolicy {
            w_smog: config.w_smog,
            w_traffic: config.w_traffic,
            w_weather: config.w_weather,
            w_distance: config.w_distance,
            neutral_smog_weight: config.neutral_smog_weight,
            traffic,
            weather,
        }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        let (traffic, weather) = estimators_for(&config.conditions_policy);
        Self::new(config, traffic, weather)
    }

    /// Score a path using a synchronous exposure lookup. `None` (or a
    /// non-finite reading) scores that point with the neutral smog weight.
    pub fn score_route<F>(&self, path: &[Coordinates], distance_km: f64, mut lookup: F) -> ScoreBreakdown
    where
        F: FnMut(&Coordinates) -> Option<f64>,
    {
        let readings: Vec<Option<f64>> = path.iter().map(&mut lookup).collect();
        self.score_readings(path, &readings, distance_km)
    }

    /// Score a path whose exposure readings were gathered up front.
    /// `readings[i]` belongs to `path[i]`; missing entries count as no data.
    pub fn score_readings(
        &self,
        path: &[Coordinates],
        readings: &[Option<f64>],
        distance_km: f64,
    ) -> ScoreBreakdown {
        let mut smog_total = 0.0;
        let mut traffic_total = 0.0;
        let mut weather_total = 0.0;
        let mut neutral_points = 0;

        for (idx, point) in path.iter().enumerate() {
            match readings.get(idx).copied().flatten() {
                Some(level) if level.is_finite() => smog_total += f64::from(smog_weight(level)),
                _ => {
                    neutral_points += 1;
                    smog_total += self.neutral_smog_weight;
                }
            }

            traffic_total += self.traffic.traffic_delay(point);
            weather_total += self.weather.weather_penalty(point);
        }

        let segment_count = path.len().max(1);
        let n = segment_count as f64;

        let total = (smog_total / n) * self.w_smog
            + (traffic_total / n) * self.w_traffic
            + (weather_total / n) * self.w_weather
            + distance_km * self.w_distance;

        ScoreBreakdown {
            smog_total,
            traffic_total,
            weather_total,
            neutral_points,
            segment_count,
            distance_km,
            total,
        }
    }
}
