//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For scoring knobs that benefit from runtime retuning, see
//! [`RankingConfig`](crate::config::RankingConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "5000";

// --- Upstream providers ---

pub const MAPBOX_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";
pub const MAPBOX_GEOCODING_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";
pub const OPENWEATHER_AIR_POLLUTION_URL: &str =
    "http://api.openweathermap.org/data/2.5/air_pollution";

/// Timeout for geocoding and directions requests. These are fatal to a
/// request, so they get a more generous budget than exposure lookups.
pub const PROVIDER_REQUEST_TIMEOUT_SECONDS: u64 = 15;

// --- Composite score defaults ---

/// Multiplier on the mean smog weight.
pub const DEFAULT_W_SMOG: f64 = 5.0;
/// Multiplier on the mean traffic delay.
pub const DEFAULT_W_TRAFFIC: f64 = 2.0;
/// Multiplier on the mean weather penalty.
pub const DEFAULT_W_WEATHER: f64 = 3.0;
/// Multiplier on the route distance in km.
pub const DEFAULT_W_DISTANCE: f64 = 1.0;
/// Smog weight substituted for a sample point with no exposure reading.
pub const DEFAULT_NEUTRAL_SMOG_WEIGHT: f64 = 3.0;

/// Smog-weight buckets: (inclusive upper bound on the smog level, weight).
/// Levels above the last bound get [`SMOG_WEIGHT_CEILING`].
pub const SMOG_WEIGHT_BUCKETS: [(f64, u8); 5] =
    [(50.0, 1), (100.0, 2), (150.0, 3), (200.0, 4), (300.0, 5)];
pub const SMOG_WEIGHT_CEILING: u8 = 6;

// --- Placeholder condition penalties ---

/// Candidate per-point traffic delays, drawn uniformly.
pub const TRAFFIC_DELAY_CHOICES: [u8; 4] = [0, 1, 2, 3];
/// Candidate per-point weather penalties, drawn uniformly.
pub const WEATHER_PENALTY_CHOICES: [u8; 5] = [0, 2, 5, 7, 10];

// --- Downsampling ---

/// Spacing between sample points along a route, in meters.
pub const DEFAULT_SAMPLE_INTERVAL_METERS: f64 = 3_000.0;
/// Lower bound on the target sample count (start + end).
pub const MIN_SAMPLE_POINTS: usize = 2;

// --- Exposure lookups ---

/// Per-lookup timeout; a lookup that exceeds it scores as neutral.
pub const DEFAULT_EXPOSURE_TIMEOUT_MS: u64 = 5_000;
/// Upper bound on in-flight exposure lookups for one ranking request.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 16;

// --- Smog variation smoothing ---

/// Jitter applied to flat smog series is drawn from `-JITTER..=JITTER`.
pub const SMOG_VARIATION_JITTER: i32 = 15;

// --- Exposure cache ---

/// Default exposure cache TTL: 1 hour. Overridden by `EXPOSURE_CACHE_TTL`.
pub const DEFAULT_EXPOSURE_CACHE_TTL_SECONDS: u64 = 3_600;
/// Maximum entries for the in-memory exposure cache.
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 10_000;
/// Exposure cache grid cells per degree; 1000 gives ~100m cells.
pub const EXPOSURE_CACHE_CELLS_PER_DEGREE: f64 = 1_000.0;
/// Prefix for exposure readings stored in Redis.
pub const REDIS_EXPOSURE_NAMESPACE: &str = "smogroute:exposure";
