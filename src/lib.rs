// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::ExposureCache;
use services::ranking::{RankingEngine, SmogVariation};
use services::{ExposureOracle, Geocoder, RoutingProvider};
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub geocoder: Arc<dyn Geocoder>,
    pub routing: Arc<dyn RoutingProvider>,
    pub exposure: Arc<dyn ExposureOracle>,
    pub ranking_engine: RankingEngine,
    pub smog_variation: SmogVariation,
    pub cache: Option<Arc<dyn ExposureCache>>,
}
