use super::conditions::UniformChoice;
use crate::constants::SMOG_VARIATION_JITTER;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A presentation-layer point carrying a smog level. Any other fields the
/// client sent ride along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmogPoint {
    #[serde(rename = "smogLevel", serialize_with = "serialize_level")]
    pub smog_level: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SmogPoint {
    pub fn new(smog_level: f64) -> Self {
        SmogPoint {
            smog_level,
            extra: Map::new(),
        }
    }
}

// Whole levels go back out as JSON integers, matching what clients send
fn serialize_level<S: Serializer>(level: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if level.fract() == 0.0 && level.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*level as i64)
    } else {
        serializer.serialize_f64(*level)
    }
}

/// Breaks up flat smog series so charts of a uniform stub reading don't
/// render as a single line.
pub struct SmogVariation {
    jitter: UniformChoice<i32>,
}

impl SmogVariation {
    pub fn new() -> Self {
        SmogVariation {
            jitter: UniformChoice::new(&jitter_offsets()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        SmogVariation {
            jitter: UniformChoice::seeded(&jitter_offsets(), seed),
        }
    }

    /// If every point reports the same smog level, shift each by an
    /// independent jitter in `[-15, 15]`, clamped at zero. Mixed series are
    /// returned unchanged.
    pub fn vary(&self, points: Vec<SmogPoint>) -> Vec<SmogPoint> {
        let Some(first) = points.first().map(|p| p.smog_level) else {
            return points;
        };
        if points.iter().any(|p| p.smog_level != first) {
            return points;
        }

        tracing::debug!(
            points = points.len(),
            smog_level = first,
            "Flat smog series, applying jitter"
        );

        points
            .into_iter()
            .map(|mut point| {
                let offset = self.jitter.draw().unwrap_or(0);
                point.smog_level = (point.smog_level + f64::from(offset)).max(0.0);
                point
            })
            .collect()
    }
}

impl Default for SmogVariation {
    fn default() -> Self {
        Self::new()
    }
}

fn jitter_offsets() -> Vec<i32> {
    (-SMOG_VARIATION_JITTER..=SMOG_VARIATION_JITTER).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_series_is_jittered_within_bounds() {
        let variation = SmogVariation::seeded(3);
        for _ in 0..100 {
            let points = vec![SmogPoint::new(40.0); 3];
            for point in variation.vary(points) {
                assert!((25.0..=55.0).contains(&point.smog_level));
                assert_eq!(point.smog_level.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_jitter_clamps_at_zero() {
        let variation = SmogVariation::seeded(5);
        for _ in 0..100 {
            for point in variation.vary(vec![SmogPoint::new(4.0); 4]) {
                assert!((0.0..=19.0).contains(&point.smog_level));
            }
        }
    }

    #[test]
    fn test_mixed_series_is_unchanged() {
        let variation = SmogVariation::seeded(9);
        let points = vec![SmogPoint::new(40.0), SmogPoint::new(50.0)];
        assert_eq!(variation.vary(points.clone()), points);
    }

    #[test]
    fn test_empty_series_is_unchanged() {
        let variation = SmogVariation::seeded(1);
        assert!(variation.vary(Vec::new()).is_empty());
    }

    #[test]
    fn test_extra_fields_survive() {
        let raw = json!([
            {"smogLevel": 40, "lat": 33.68, "lng": 73.04},
            {"smogLevel": 40, "lat": 33.70, "lng": 73.06}
        ]);
        let points: Vec<SmogPoint> = serde_json::from_value(raw).unwrap();
        let varied = SmogVariation::seeded(2).vary(points);
        let out = serde_json::to_value(&varied).unwrap();

        assert_eq!(out[0]["lat"], 33.68);
        assert_eq!(out[1]["lng"], 73.06);
        assert!(out[0]["smogLevel"].is_i64());
    }

    #[test]
    fn test_fractional_levels_serialize_as_floats() {
        let out = serde_json::to_value(SmogPoint::new(12.5)).unwrap();
        assert_eq!(out, json!({"smogLevel": 12.5}));
    }
}
