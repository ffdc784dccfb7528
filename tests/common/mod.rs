use async_trait::async_trait;
use smogroute::cache::{ExposureCache, MemoryCacheService};
use smogroute::config::RankingConfig;
use smogroute::models::{Coordinates, ExposureReading, RouteGeometry, Step};
use smogroute::services::ranking::{FixedConditions, RankingEngine, ScoringPolicy, SmogVariation};
use smogroute::services::{ExposureOracle, Geocoder, RoutingProvider};
use smogroute::{AppError, AppState, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Geocoder backed by a fixed place table
#[allow(dead_code)]
pub struct FakeGeocoder {
    pub places: HashMap<String, Coordinates>,
}

#[allow(dead_code)]
impl FakeGeocoder {
    pub fn pakistan() -> Self {
        let mut places = HashMap::new();
        places.insert(
            "Islamabad".to_string(),
            Coordinates::from_lng_lat(73.0479, 33.6844),
        );
        places.insert(
            "Lahore".to_string(),
            Coordinates::from_lng_lat(74.3436, 31.5497),
        );
        FakeGeocoder { places }
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, place: &str) -> Result<Coordinates> {
        self.places
            .get(place)
            .copied()
            .ok_or_else(|| AppError::LocationNotFound(place.to_string()))
    }
}

/// Routing provider returning canned routes, or a canned failure
#[allow(dead_code)]
pub enum FakeRouting {
    Routes(Vec<RouteGeometry>),
    Outage { status: u16 },
}

#[async_trait]
impl RoutingProvider for FakeRouting {
    async fn get_routes(
        &self,
        _origin: &Coordinates,
        _destination: &Coordinates,
    ) -> Result<Vec<RouteGeometry>> {
        match self {
            FakeRouting::Routes(routes) if routes.is_empty() => Err(AppError::NoRoutesFound),
            FakeRouting::Routes(routes) => Ok(routes.clone()),
            FakeRouting::Outage { status } => Err(AppError::ProviderError {
                status: *status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

/// Smog level chosen by longitude band; `None` means no data there
#[allow(dead_code)]
pub struct FakeOracle {
    pub level_for: fn(&Coordinates) -> Option<f64>,
}

#[async_trait]
impl ExposureOracle for FakeOracle {
    async fn get_exposure(&self, point: &Coordinates) -> Result<ExposureReading> {
        match (self.level_for)(point) {
            Some(level) => Ok(ExposureReading {
                location: *point,
                pm25: Some(level),
                pm10: None,
                smog_level: level,
                aqi_level: Some(2),
            }),
            None => Err(AppError::DataUnavailable(
                "No pollution data found for this location".to_string(),
            )),
        }
    }
}

/// A straight east-west route with `points` coordinates starting at `lng`
#[allow(dead_code)]
pub fn straight_route(route_number: u32, distance_meters: f64, lng: f64, points: usize) -> RouteGeometry {
    let path: Vec<Coordinates> = (0..points)
        .map(|i| Coordinates::from_lng_lat(lng + i as f64 * 0.001, 33.0))
        .collect();
    let steps = vec![
        Step {
            instruction: "Head east".to_string(),
            location: path[0],
            distance: distance_meters,
            duration: 600.0,
        },
        Step {
            instruction: "You have arrived at your destination".to_string(),
            location: path[points - 1],
            distance: 0.0,
            duration: 0.0,
        },
    ];
    RouteGeometry::new(route_number, distance_meters, 600.0, path, steps)
}

/// Ranking engine with traffic and weather penalties switched off
#[allow(dead_code)]
pub fn calm_engine(config: RankingConfig) -> RankingEngine {
    let policy = ScoringPolicy::new(
        &config,
        Arc::new(FixedConditions(0.0)),
        Arc::new(FixedConditions(0.0)),
    );
    RankingEngine::with_policy(config, policy)
}

#[allow(dead_code)]
pub fn test_state(routing: FakeRouting, oracle: FakeOracle) -> Arc<AppState> {
    let cache: Arc<dyn ExposureCache> = Arc::new(MemoryCacheService::new(60, 100));
    Arc::new(AppState {
        geocoder: Arc::new(FakeGeocoder::pakistan()),
        routing: Arc::new(routing),
        exposure: Arc::new(oracle),
        ranking_engine: calm_engine(RankingConfig::default()),
        smog_variation: SmogVariation::seeded(17),
        cache: Some(cache),
    })
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
}
