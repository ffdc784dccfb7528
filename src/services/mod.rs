//! External collaborators of the ranking engine and their HTTP adapters.
//!
//! The engine and handlers depend only on the traits below; the Mapbox and
//! OpenWeatherMap clients are the production implementations.

pub mod location;
pub mod mapbox;
pub mod openweather;
pub mod ranking;

use crate::error::Result;
use crate::models::{Coordinates, ExposureReading, RouteGeometry};
use async_trait::async_trait;

/// Resolves free-text places (or literal `lng,lat` pairs) to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Remote lookup of a place name. Fails with `LocationNotFound` when the
    /// provider has no match.
    async fn geocode(&self, place: &str) -> Result<Coordinates>;

    /// Resolve user input. Literal coordinates bypass the remote lookup.
    async fn resolve(&self, input: &str) -> Result<Coordinates> {
        if let Some(coords) = location::parse_literal_coordinates(input) {
            tracing::debug!(
                lng = coords.lng,
                lat = coords.lat,
                "Using literal coordinates for '{}'",
                input
            );
            return Ok(coords);
        }
        self.geocode(input.trim()).await
    }
}

/// Supplies candidate route geometries between two points.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Fails with `NoRoutesFound` or `ProviderError`.
    async fn get_routes(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<Vec<RouteGeometry>>;
}

/// Air-quality lookup for a single coordinate.
#[async_trait]
pub trait ExposureOracle: Send + Sync {
    /// Fails with `DataUnavailable` when no reading exists for the location.
    async fn get_exposure(&self, point: &Coordinates) -> Result<ExposureReading>;
}
