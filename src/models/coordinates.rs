use serde::{Deserialize, Serialize};

/// A WGS84 position. Serialized GeoJSON-style as a `[lng, lat]` pair.
///
/// Values outside the valid ranges are carried through untouched; only
/// [`Coordinates::new`] enforces bounds, for callers that accept user input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Build from a provider `[lng, lat]` pair without range checks.
    pub const fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Coordinates { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from(pair: [f64; 2]) -> Self {
        Coordinates::from_lng_lat(pair[0], pair[1])
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lng, coords.lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(48.8566, 2.3522).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_out_of_range_values_are_carried() {
        let coords = Coordinates::from_lng_lat(200.0, -95.0);
        assert_eq!(coords.lng, 200.0);
        assert_eq!(coords.lat, -95.0);
    }

    #[test]
    fn test_serializes_as_lng_lat_pair() {
        let coords = Coordinates::from_lng_lat(73.0479, 33.6844);
        let json = serde_json::to_value(coords).unwrap();
        assert_eq!(json, serde_json::json!([73.0479, 33.6844]));

        let back: Coordinates = serde_json::from_value(json).unwrap();
        assert_eq!(back, coords);
    }
}
