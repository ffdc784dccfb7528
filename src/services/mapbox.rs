use crate::constants::{
    MAPBOX_DIRECTIONS_BASE_URL, MAPBOX_GEOCODING_BASE_URL, PROVIDER_REQUEST_TIMEOUT_SECONDS,
};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteGeometry, Step};
use crate::services::{Geocoder, RoutingProvider};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

const DRIVING_PROFILE: &str = "driving";

/// How the client authenticates with Mapbox.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Current default: send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxClient {
    client: Client,
    api_key: String,
    directions_base_url: String,
    geocoding_base_url: String,
    auth_mode: AuthMode,
}

impl MapboxClient {
    pub fn new(api_key: String) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            directions_base_url: MAPBOX_DIRECTIONS_BASE_URL.to_string(),
            geocoding_base_url: MAPBOX_GEOCODING_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
        }
    }

    pub fn with_config(
        api_key: String,
        directions_base_url: String,
        geocoding_base_url: String,
        auth_mode: AuthMode,
    ) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            directions_base_url,
            geocoding_base_url,
            auth_mode,
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_mode {
            AuthMode::DirectToken => request.query(&[("access_token", &self.api_key)]),
            AuthMode::BearerHeader => request.bearer_auth(&self.api_key),
        }
    }

    /// Fetch driving routes with alternatives, full geometry, and steps.
    /// Routes keep the provider's order and are numbered from 1.
    pub async fn get_directions(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<Vec<RouteGeometry>> {
        let url = format!(
            "{}/{}/{},{};{},{}",
            self.directions_base_url,
            DRIVING_PROFILE,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        );

        tracing::debug!(
            from_lng = origin.lng,
            from_lat = origin.lat,
            to_lng = destination.lng,
            to_lat = destination.lat,
            "Mapbox directions request"
        );

        let request = self
            .client
            .get(&url)
            .query(&[
                ("alternatives", "true"),
                ("geometries", "geojson"),
                ("overview", "full"),
                ("steps", "true"),
                ("annotations", "duration,distance"),
            ])
            .timeout(Duration::from_secs(PROVIDER_REQUEST_TIMEOUT_SECONDS));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AppError::MapboxApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = %status, "Mapbox directions HTTP error {}: {}", status, body);
            return Err(AppError::ProviderError {
                status: status.as_u16(),
                body,
            });
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::MapboxApi(format!("Failed to parse response: {}", e)))?;

        if directions.routes.is_empty() {
            tracing::warn!("Mapbox returned 0 routes");
            return Err(AppError::NoRoutesFound);
        }

        tracing::debug!(
            routes = directions.routes.len(),
            "Mapbox returned {} candidate routes",
            directions.routes.len()
        );

        Ok(directions
            .routes
            .into_iter()
            .enumerate()
            .map(|(idx, route)| route.into_geometry(idx as u32 + 1))
            .collect())
    }

    /// Forward-geocode a place name to the first matching feature's center.
    pub async fn geocode_place(&self, place: &str) -> Result<Coordinates> {
        let url = format!(
            "{}/{}.json",
            self.geocoding_base_url,
            urlencoding::encode(place)
        );

        let request = self
            .client
            .get(&url)
            .query(&[
                ("limit", "1"),
                ("autocomplete", "false"),
                ("types", "address,poi,place"),
            ])
            .timeout(Duration::from_secs(PROVIDER_REQUEST_TIMEOUT_SECONDS));

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AppError::MapboxApi(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::MapboxApi(format!(
                "Geocoding HTTP {}: {}",
                status, body
            )));
        }

        let geocoding: GeocodingApiResponse = response.json().await.map_err(|e| {
            AppError::MapboxApi(format!("Failed to parse geocoding response: {}", e))
        })?;

        geocoding
            .features
            .first()
            .map(|feature| Coordinates::from(feature.center))
            .ok_or_else(|| AppError::LocationNotFound(place.to_string()))
    }
}

#[async_trait]
impl RoutingProvider for MapboxClient {
    async fn get_routes(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<Vec<RouteGeometry>> {
        self.get_directions(origin, destination).await
    }
}

#[async_trait]
impl Geocoder for MapboxClient {
    async fn geocode(&self, place: &str) -> Result<Coordinates> {
        self.geocode_place(place).await
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    #[serde(default)]
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64, // meters
    duration: f64, // seconds
    #[serde(default)]
    geometry: Option<MapboxGeometry>,
    #[serde(default)]
    legs: Vec<MapboxLeg>,
}

impl MapboxRoute {
    fn into_geometry(self, route_number: u32) -> RouteGeometry {
        let path = self
            .geometry
            .map(|g| g.coordinates.into_iter().map(Coordinates::from).collect())
            .unwrap_or_default();

        let steps = self
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| Step {
                instruction: step.maneuver.instruction,
                location: Coordinates::from(step.maneuver.location),
                distance: step.distance,
                duration: step.duration,
            })
            .collect();

        RouteGeometry::new(route_number, self.distance, self.duration, path, steps)
    }
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    #[serde(default)]
    steps: Vec<MapboxStep>,
}

#[derive(Debug, Deserialize)]
struct MapboxStep {
    distance: f64,
    duration: f64,
    maneuver: MapboxManeuver,
}

#[derive(Debug, Deserialize)]
struct MapboxManeuver {
    #[serde(default)]
    instruction: String,
    location: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct GeocodingApiResponse {
    #[serde(default)]
    features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodingFeature {
    center: [f64; 2], // [lng, lat]
}
