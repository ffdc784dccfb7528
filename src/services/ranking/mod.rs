mod conditions;
mod downsample;
mod scoring;
mod smoothing;

pub use conditions::{
    FixedConditions, RandomTrafficEstimator, RandomWeatherEstimator, TrafficEstimator,
    UniformChoice, WeatherEstimator,
};
pub use downsample::downsample;
pub use scoring::{smog_weight, ScoreBreakdown, ScoringPolicy};
pub use smoothing::{SmogPoint, SmogVariation};

use crate::config::RankingConfig;
use crate::models::{Coordinates, RouteGeometry, ScoredRoute};
use crate::services::ExposureOracle;
use futures::future::join_all;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Downsamples, scores, and orders candidate routes for one request.
///
/// Holds no per-request state: every call to [`rank_routes`](Self::rank_routes)
/// builds and returns its own result.
pub struct RankingEngine {
    config: RankingConfig,
    policy: ScoringPolicy,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Self {
        let policy = ScoringPolicy::from_config(&config);
        RankingEngine { config, policy }
    }

    /// Use a caller-supplied scoring policy (e.g. custom estimators)
    pub fn with_policy(config: RankingConfig, policy: ScoringPolicy) -> Self {
        RankingEngine { config, policy }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Replace a route's full geometry with its sample points
    pub fn downsample_route(&self, route: RouteGeometry) -> RouteGeometry {
        let path = downsample(
            &route.path,
            route.distance_meters,
            self.config.sample_interval_m,
        );
        route.with_path(path)
    }

    /// Score every route and sort ascending by score (lower is better).
    ///
    /// Exposure lookups for all routes run concurrently, capped at
    /// `max_concurrent_lookups`. A lookup that fails or exceeds
    /// `exposure_timeout_ms` scores as neutral; it never drops the route.
    /// Ties keep the input order.
    pub async fn rank_routes(
        &self,
        routes: Vec<RouteGeometry>,
        oracle: &dyn ExposureOracle,
    ) -> Vec<ScoredRoute> {
        if routes.is_empty() {
            return Vec::new();
        }

        let semaphore = Semaphore::new(self.config.max_concurrent_lookups);
        let semaphore = &semaphore;
        let candidates = routes.len();

        let route_futures = routes.into_iter().map(move |route| {
            async move {
                let route = self.downsample_route(route);
                let readings = join_all(
                    route
                        .path
                        .iter()
                        .map(|point| self.lookup_smog_level(oracle, point, semaphore)),
                )
                .await;

                let breakdown =
                    self.policy
                        .score_readings(&route.path, &readings, route.distance_km);

                tracing::debug!(
                    route_number = route.route_number,
                    sample_points = route.path.len(),
                    neutral_points = breakdown.neutral_points,
                    distance_km = route.distance_km,
                    score = breakdown.total,
                    "Scored route {}: {:.2}",
                    route.route_number,
                    breakdown.total
                );

                ScoredRoute::new(route, breakdown.total)
            }
        });

        let mut scored = join_all(route_futures).await;

        // `sort_by` is stable, so equal scores keep provider order
        if self.config.sort_on_rounded_score {
            scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        } else {
            scored.sort_by(|a, b| a.raw_score.total_cmp(&b.raw_score));
        }

        tracing::info!(
            candidates,
            best_route = scored.first().map(|s| s.route.route_number),
            best_score = scored.first().map(|s| s.score),
            "Ranked {} candidate routes",
            candidates
        );

        scored
    }

    async fn lookup_smog_level(
        &self,
        oracle: &dyn ExposureOracle,
        point: &Coordinates,
        semaphore: &Semaphore,
    ) -> Option<f64> {
        let _permit = semaphore.acquire().await.ok()?;
        let timeout = Duration::from_millis(self.config.exposure_timeout_ms);

        match tokio::time::timeout(timeout, oracle.get_exposure(point)).await {
            Ok(Ok(reading)) => Some(reading.smog_level),
            Ok(Err(e)) => {
                tracing::debug!(
                    lat = point.lat,
                    lng = point.lng,
                    "Exposure lookup failed, using neutral weight: {}",
                    e
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    lat = point.lat,
                    lng = point.lng,
                    timeout_ms = self.config.exposure_timeout_ms,
                    "Exposure lookup timed out, using neutral weight"
                );
                None
            }
        }
    }
}
