use crate::error::{AppError, Result};
use crate::models::route::{CoordinatesResponse, ResolvedLocation, RouteRequest};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /coordinates
/// Resolve both ends of a trip to coordinates
pub async fn resolve_coordinates(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<CoordinatesResponse>> {
    let (from, to) = request.validate().map_err(AppError::InvalidRequest)?;

    let (from_coords, to_coords) =
        futures::try_join!(state.geocoder.resolve(from), state.geocoder.resolve(to))?;

    Ok(Json(CoordinatesResponse {
        from: ResolvedLocation::new(from, from_coords),
        to: ResolvedLocation::new(to, to_coords),
    }))
}
