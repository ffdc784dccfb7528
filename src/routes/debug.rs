use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    match state.cache {
        Some(ref cache) => {
            let healthy = cache.health_check().await;
            let lookups = cache.stats().await;
            status["checks"]["cache"] = json!({
                "healthy": healthy,
                "lookups": lookups,
            });
            if !healthy {
                status["status"] = json!("degraded");
            }
        }
        None => {
            status["checks"]["cache"] = json!("disabled");
        }
    }

    let ranking = state.ranking_engine.config();
    status["checks"]["ranking"] = json!({
        "w_smog": ranking.w_smog,
        "w_traffic": ranking.w_traffic,
        "w_weather": ranking.w_weather,
        "w_distance": ranking.w_distance,
        "sample_interval_m": ranking.sample_interval_m,
    });

    Json(status)
}
