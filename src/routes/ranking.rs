use crate::error::{AppError, Result};
use crate::models::route::{RankedRoutesResponse, RouteRequest, RoutesResponse};
use crate::models::RouteGeometry;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Geocode both ends and fetch the provider's candidate routes.
/// Any failure here is fatal to the request.
async fn fetch_candidates(state: &AppState, request: &RouteRequest) -> Result<Vec<RouteGeometry>> {
    let (from, to) = request.validate().map_err(AppError::InvalidRequest)?;

    let (origin, destination) =
        futures::try_join!(state.geocoder.resolve(from), state.geocoder.resolve(to))?;

    tracing::info!(
        from = %from,
        to = %to,
        "Route request: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
        origin.lng, origin.lat, destination.lng, destination.lat
    );

    let routes = state.routing.get_routes(&origin, &destination).await?;
    if routes.is_empty() {
        return Err(AppError::NoRoutesFound);
    }
    Ok(routes)
}

/// POST /routes
/// Candidate routes with their paths downsampled to sample points
pub async fn candidate_routes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RoutesResponse>> {
    let routes = fetch_candidates(&state, &request)
        .await?
        .into_iter()
        .map(|route| state.ranking_engine.downsample_route(route))
        .collect();

    Ok(Json(RoutesResponse { routes }))
}

/// POST /routes/optimal
/// Candidate routes ranked best-first by composite score
pub async fn optimal_routes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RankedRoutesResponse>> {
    let routes = fetch_candidates(&state, &request).await?;

    let ranked_routes = state
        .ranking_engine
        .rank_routes(routes, state.exposure.as_ref())
        .await;

    Ok(Json(RankedRoutesResponse { ranked_routes }))
}
