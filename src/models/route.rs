use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Round to 2 decimal places, the precision used for every reported
/// distance, duration, and score.
///
/// Rounds the exact binary value, with exact halves going to the even
/// hundredth: `5.625` gives `5.62` while `12.345` (stored slightly above the
/// half) gives `12.35`. Scaling by 100 first would lose that distinction.
pub fn round_2dp(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let bits = value.abs().to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased_exponent - 1075)
    };
    if exponent >= 0 {
        // at least 2^52, already whole
        return value;
    }

    // |value| * 100 = mantissa * 100 / 2^shift, exactly
    let shift = exponent.unsigned_abs();
    let hundredths = if shift > 60 {
        0
    } else {
        let scaled = u128::from(mantissa) * 100;
        let whole = scaled >> shift;
        let remainder = scaled - (whole << shift);
        let half = 1u128 << (shift - 1);
        if remainder > half || (remainder == half && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        }
    };

    (hundredths as f64 / 100.0).copysign(value)
}

/// One maneuver of a route, flattened across all legs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub instruction: String,
    /// Maneuver location
    pub location: Coordinates,
    /// Segment distance in meters
    pub distance: f64,
    /// Segment duration in seconds
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteGeometry {
    /// 1-based position in the routing provider's response
    pub route_number: u32,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Ordered path; first is the origin, last is the destination
    #[serde(rename = "path_coordinates")]
    pub path: Vec<Coordinates>,
    pub steps: Vec<Step>,
}

impl RouteGeometry {
    pub fn new(
        route_number: u32,
        distance_meters: f64,
        duration_seconds: f64,
        path: Vec<Coordinates>,
        steps: Vec<Step>,
    ) -> Self {
        RouteGeometry {
            route_number,
            distance_meters,
            duration_seconds,
            distance_km: round_2dp(distance_meters / 1000.0),
            duration_min: round_2dp(duration_seconds / 60.0),
            path,
            steps,
        }
    }

    /// Replace the path, e.g. with its downsampled form
    pub fn with_path(mut self, path: Vec<Coordinates>) -> Self {
        self.path = path;
        self
    }
}

/// A route paired with its composite score. Lower is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRoute {
    pub route: RouteGeometry,
    /// Composite score rounded to 2 decimal places
    pub score: f64,
    /// Unrounded score, kept for ordering
    #[serde(skip)]
    pub raw_score: f64,
}

impl ScoredRoute {
    pub fn new(route: RouteGeometry, raw_score: f64) -> Self {
        ScoredRoute {
            route,
            score: round_2dp(raw_score),
            raw_score,
        }
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub from_location: Option<String>,
    #[serde(default)]
    pub to_location: Option<String>,
}

impl RouteRequest {
    /// Returns the trimmed (origin, destination) pair, or an error if either
    /// side is missing or blank.
    pub fn validate(&self) -> Result<(&str, &str), String> {
        let from = self.from_location.as_deref().map(str::trim).unwrap_or("");
        let to = self.to_location.as_deref().map(str::trim).unwrap_or("");

        if from.is_empty() || to.is_empty() {
            return Err("Both 'from_location' and 'to_location' are required".to_string());
        }
        Ok((from, to))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteGeometry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankedRoutesResponse {
    pub ranked_routes: Vec<ScoredRoute>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    pub fn new(location: &str, coords: Coordinates) -> Self {
        ResolvedLocation {
            location: location.to_string(),
            latitude: coords.lat,
            longitude: coords.lng,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CoordinatesResponse {
    pub from: ResolvedLocation,
    pub to: ResolvedLocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_2dp_halves_go_to_even() {
        let cases = [
            (5.625, 5.62),
            (5.635, 5.63),
            (10.125, 10.12),
            (12.345, 12.35),
            (2.675, 2.67),
            (0.125, 0.12),
            (0.375, 0.38),
            (-5.625, -5.62),
            (16.666666, 16.67),
            (8.0, 8.0),
            (0.0, 0.0),
            (1e-9, 0.0),
            (123_456.785, 123_456.79),
        ];
        for (value, expected) in cases {
            assert_eq!(round_2dp(value), expected, "round_2dp({})", value);
        }
        assert!(round_2dp(f64::NAN).is_nan());
        assert_eq!(round_2dp(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_reported_values_round_halves_to_even() {
        let route = RouteGeometry::new(1, 10_125.0, 337.5, vec![], vec![]);
        assert_eq!(route.distance_km, 10.12);
        assert_eq!(route.duration_min, 5.62);

        let scored = ScoredRoute::new(route, 5.625);
        assert_eq!(scored.score, 5.62);
        assert_eq!(scored.raw_score, 5.625);
    }

    #[test]
    fn test_route_geometry_derived_units() {
        let route = RouteGeometry::new(1, 12_345.0, 1_000.0, vec![], vec![]);
        assert_eq!(route.distance_km, 12.35);
        assert_eq!(route.duration_min, 16.67);
    }

    #[test]
    fn test_route_request_validation() {
        let req = RouteRequest {
            from_location: Some("  Islamabad ".to_string()),
            to_location: Some("Lahore".to_string()),
        };
        assert_eq!(req.validate().unwrap(), ("Islamabad", "Lahore"));

        let missing = RouteRequest {
            from_location: Some("Islamabad".to_string()),
            to_location: None,
        };
        assert!(missing.validate().is_err());

        let blank = RouteRequest {
            from_location: Some("   ".to_string()),
            to_location: Some("Lahore".to_string()),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_scored_route_rounds_reported_score() {
        let route = RouteGeometry::new(1, 3000.0, 300.0, vec![], vec![]);
        let scored = ScoredRoute::new(route, 8.004_9);
        assert_eq!(scored.score, 8.0);
        assert_eq!(scored.raw_score, 8.004_9);

        let json = serde_json::to_value(&scored).unwrap();
        assert!(json.get("raw_score").is_none());
        assert_eq!(json["route"]["path_coordinates"], serde_json::json!([]));
    }
}
