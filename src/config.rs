use crate::constants::*;
use std::env;

/// Source of the per-point traffic and weather penalties.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConditionsPolicy {
    #[default]
    Random, // Uniform placeholder draws until a real conditions feed exists
    None, // All traffic and weather penalties are zero
}

impl std::str::FromStr for ConditionsPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(ConditionsPolicy::Random),
            "none" | "off" => Ok(ConditionsPolicy::None),
            _ => Err(format!(
                "Invalid conditions policy: {}. Use 'random' or 'none'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: String,
    /// Override for the directions endpoint (e.g. a local proxy)
    pub mapbox_base_url: Option<String>,
    /// Override for the geocoding endpoint
    pub mapbox_geocoding_base_url: Option<String>,
    pub openweather_api_key: String,
    pub openweather_base_url: Option<String>,
    pub redis_url: Option<String>,
    pub exposure_cache_ttl: u64,
    pub ranking: RankingConfig,
}

/// Immutable scoring and fan-out settings handed to the ranking engine.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Multiplier on the mean smog weight
    pub w_smog: f64,

    /// Multiplier on the mean traffic delay
    pub w_traffic: f64,

    /// Multiplier on the mean weather penalty
    pub w_weather: f64,

    /// Multiplier on the route distance (km)
    pub w_distance: f64,

    /// Smog weight used when a sample point has no exposure reading
    pub neutral_smog_weight: f64,

    /// Spacing between sample points along a route (meters)
    pub sample_interval_m: f64,

    /// Timeout for a single exposure lookup (milliseconds)
    pub exposure_timeout_ms: u64,

    /// Maximum exposure lookups in flight for one ranking request
    pub max_concurrent_lookups: usize,

    /// Order routes by their 2dp-rounded score instead of the raw score
    pub sort_on_rounded_score: bool,

    /// Which traffic/weather estimators to use
    pub conditions_policy: ConditionsPolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            w_smog: DEFAULT_W_SMOG,
            w_traffic: DEFAULT_W_TRAFFIC,
            w_weather: DEFAULT_W_WEATHER,
            w_distance: DEFAULT_W_DISTANCE,
            neutral_smog_weight: DEFAULT_NEUTRAL_SMOG_WEIGHT,
            sample_interval_m: DEFAULT_SAMPLE_INTERVAL_METERS,
            exposure_timeout_ms: DEFAULT_EXPOSURE_TIMEOUT_MS,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            sort_on_rounded_score: false,
            conditions_policy: ConditionsPolicy::default(),
        }
    }
}

impl RankingConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            w_smog: env::var("RANKING_W_SMOG")
                .unwrap_or_else(|_| defaults.w_smog.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_W_SMOG")?,

            w_traffic: env::var("RANKING_W_TRAFFIC")
                .unwrap_or_else(|_| defaults.w_traffic.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_W_TRAFFIC")?,

            w_weather: env::var("RANKING_W_WEATHER")
                .unwrap_or_else(|_| defaults.w_weather.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_W_WEATHER")?,

            w_distance: env::var("RANKING_W_DISTANCE")
                .unwrap_or_else(|_| defaults.w_distance.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_W_DISTANCE")?,

            neutral_smog_weight: env::var("RANKING_NEUTRAL_SMOG_WEIGHT")
                .unwrap_or_else(|_| defaults.neutral_smog_weight.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_NEUTRAL_SMOG_WEIGHT")?,

            sample_interval_m: env::var("RANKING_SAMPLE_INTERVAL_M")
                .unwrap_or_else(|_| defaults.sample_interval_m.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_SAMPLE_INTERVAL_M")?,

            exposure_timeout_ms: env::var("RANKING_EXPOSURE_TIMEOUT_MS")
                .unwrap_or_else(|_| defaults.exposure_timeout_ms.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_EXPOSURE_TIMEOUT_MS")?,

            max_concurrent_lookups: env::var("RANKING_MAX_CONCURRENT_LOOKUPS")
                .unwrap_or_else(|_| defaults.max_concurrent_lookups.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_MAX_CONCURRENT_LOOKUPS")?,

            sort_on_rounded_score: env::var("RANKING_SORT_ON_ROUNDED_SCORE")
                .unwrap_or_else(|_| defaults.sort_on_rounded_score.to_string())
                .parse()
                .map_err(|_| "Invalid RANKING_SORT_ON_ROUNDED_SCORE")?,

            conditions_policy: env::var("RANKING_CONDITIONS_POLICY")
                .unwrap_or_else(|_| "random".to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            ("w_smog", self.w_smog),
            ("w_traffic", self.w_traffic),
            ("w_weather", self.w_weather),
            ("w_distance", self.w_distance),
            ("neutral_smog_weight", self.neutral_smog_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a finite, non-negative number", name));
            }
        }

        if !self.sample_interval_m.is_finite() || self.sample_interval_m <= 0.0 {
            return Err("sample_interval_m must be greater than 0".to_string());
        }
        if self.exposure_timeout_ms == 0 {
            return Err("exposure_timeout_ms must be at least 1".to_string());
        }
        if self.max_concurrent_lookups == 0 {
            return Err("max_concurrent_lookups must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            mapbox_geocoding_base_url: env::var("MAPBOX_GEOCODING_BASE_URL").ok(),
            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .map_err(|_| "OPENWEATHER_API_KEY must be set")?,
            openweather_base_url: env::var("OPENWEATHER_BASE_URL").ok(),
            redis_url: env::var("REDIS_URL").ok(),
            exposure_cache_ttl: env::var("EXPOSURE_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_EXPOSURE_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid EXPOSURE_CACHE_TTL")?,
            ranking: RankingConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
