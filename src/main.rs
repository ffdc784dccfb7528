use axum::Router;
use smogroute::cache::{
    CachedExposureOracle, ExposureCache, MemoryCacheService, RedisCacheService,
};
use smogroute::config::Config;
use smogroute::constants::{
    DEFAULT_MEMORY_CACHE_MAX_ENTRIES, MAPBOX_DIRECTIONS_BASE_URL, MAPBOX_GEOCODING_BASE_URL,
    OPENWEATHER_AIR_POLLUTION_URL,
};
use smogroute::services::mapbox::{AuthMode, MapboxClient};
use smogroute::services::openweather::OpenWeatherClient;
use smogroute::services::ranking::{RankingEngine, SmogVariation};
use smogroute::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smogroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting smogroute API server");
    tracing::info!(
        w_smog = config.ranking.w_smog,
        w_traffic = config.ranking.w_traffic,
        w_weather = config.ranking.w_weather,
        w_distance = config.ranking.w_distance,
        conditions = ?config.ranking.conditions_policy,
        "Configuration loaded successfully"
    );

    // Initialize cache: try Redis, fall back to in-memory
    let cache: Arc<dyn ExposureCache> = if let Some(ref redis_url) = config.redis_url {
        tracing::info!("Connecting to Redis cache...");
        match RedisCacheService::new(redis_url, config.exposure_cache_ttl).await {
            Ok(redis_cache) => Arc::new(redis_cache),
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Falling back to in-memory cache.",
                    e
                );
                Arc::new(MemoryCacheService::new(
                    config.exposure_cache_ttl,
                    DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
                ))
            }
        }
    } else {
        tracing::info!("Redis URL not configured. Using in-memory cache.");
        Arc::new(MemoryCacheService::new(
            config.exposure_cache_ttl,
            DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
        ))
    };

    // Initialize services
    let mapbox_client = if config.mapbox_base_url.is_some()
        || config.mapbox_geocoding_base_url.is_some()
    {
        MapboxClient::with_config(
            config.mapbox_api_key.clone(),
            config
                .mapbox_base_url
                .clone()
                .unwrap_or_else(|| MAPBOX_DIRECTIONS_BASE_URL.to_string()),
            config
                .mapbox_geocoding_base_url
                .clone()
                .unwrap_or_else(|| MAPBOX_GEOCODING_BASE_URL.to_string()),
            AuthMode::BearerHeader,
        )
    } else {
        MapboxClient::new(config.mapbox_api_key.clone())
    };
    let mapbox_client = Arc::new(mapbox_client);

    let openweather_client = OpenWeatherClient::with_config(
        config.openweather_api_key.clone(),
        config
            .openweather_base_url
            .clone()
            .unwrap_or_else(|| OPENWEATHER_AIR_POLLUTION_URL.to_string()),
        Duration::from_millis(config.ranking.exposure_timeout_ms),
    );
    let exposure = CachedExposureOracle::new(Arc::new(openweather_client), cache.clone());

    // Create application state
    let state = Arc::new(AppState {
        geocoder: mapbox_client.clone(),
        routing: mapbox_client,
        exposure: Arc::new(exposure),
        ranking_engine: RankingEngine::new(config.ranking.clone()),
        smog_variation: SmogVariation::new(),
        cache: Some(cache),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", smogroute::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
