pub mod debug;
pub mod exposure;
pub mod locations;
pub mod ranking;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{AppError, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/coordinates", post(locations::resolve_coordinates))
        .route("/aqi", get(exposure::get_aqi))
        .route("/smog-variation", post(exposure::smog_variation))
        .route("/routes", post(ranking::candidate_routes))
        .route("/routes/optimal", post(ranking::optimal_routes))
        .route("/debug/health", get(debug::health_check))
        .fallback(unknown_endpoint)
        .with_state(state)
}

async fn unknown_endpoint(uri: Uri) -> AppError {
    AppError::NotFound(format!("No endpoint at {}", uri.path()))
}
