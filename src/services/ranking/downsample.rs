use crate::constants::MIN_SAMPLE_POINTS;
use crate::models::Coordinates;

/// Reduce a route's coordinates to roughly one sample per `interval_m` of
/// route distance.
///
/// Points are taken by index stride, not by distance along the path: with
/// `target = max(2, floor(distance / interval))` and
/// `step = max(1, floor(len / target))`, the result is
/// `coords[0], coords[step], coords[2*step], ...`. The final coordinate is
/// always present, appended when the stride skips it.
///
/// Non-finite or negative distances fall back to the minimum target count.
pub fn downsample(coords: &[Coordinates], total_distance_m: f64, interval_m: f64) -> Vec<Coordinates> {
    let Some(last) = coords.last() else {
        return Vec::new();
    };

    // `as usize` saturates: NaN and negatives become 0, +inf becomes usize::MAX
    let target_points = ((total_distance_m / interval_m) as usize).max(MIN_SAMPLE_POINTS);
    let step = (coords.len() / target_points).max(1);

    let mut sampled: Vec<Coordinates> = coords.iter().step_by(step).copied().collect();

    let last_sampled_idx = (coords.len() - 1) / step * step;
    if last_sampled_idx != coords.len() - 1 && sampled.last() != Some(last) {
        sampled.push(*last);
    }

    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: f64 = 3000.0;

    fn line(n: usize) -> Vec<Coordinates> {
        (0..n)
            .map(|i| Coordinates::from_lng_lat(73.0 + i as f64 * 0.001, 33.0))
            .collect()
    }

    #[test]
    fn test_empty_route() {
        assert!(downsample(&[], 10_000.0, INTERVAL).is_empty());
    }

    #[test]
    fn test_single_point_is_not_duplicated() {
        let coords = line(1);
        assert_eq!(downsample(&coords, 0.0, INTERVAL), coords);
    }

    #[test]
    fn test_stride_and_terminal_point() {
        // 30km -> 10 targets, 25 coords -> step 2 -> indices 0,2,..,24
        let coords = line(25);
        let sampled = downsample(&coords, 30_000.0, INTERVAL);
        assert_eq!(sampled.len(), 13);
        assert_eq!(sampled[1], coords[2]);
        assert_eq!(sampled.last(), coords.last());

        // 24 coords -> step 2 -> indices 0,2,..,22 then the appended 23
        let coords = line(24);
        let sampled = downsample(&coords, 30_000.0, INTERVAL);
        assert_eq!(sampled.len(), 13);
        assert_eq!(sampled[11], coords[22]);
        assert_eq!(sampled[12], coords[23]);
    }

    #[test]
    fn test_short_route_uses_two_targets() {
        // 1km -> target 2, 10 coords -> step 5 -> indices 0,5 then 9
        let coords = line(10);
        let sampled = downsample(&coords, 1_000.0, INTERVAL);
        assert_eq!(sampled, vec![coords[0], coords[5], coords[9]]);
    }

    #[test]
    fn test_more_targets_than_points_keeps_everything() {
        let coords = line(5);
        assert_eq!(downsample(&coords, 300_000.0, INTERVAL), coords);
    }

    #[test]
    fn test_degenerate_distances_do_not_panic() {
        let coords = line(8);
        for distance in [f64::NAN, -5.0, f64::INFINITY, 0.0] {
            let sampled = downsample(&coords, distance, INTERVAL);
            assert!(!sampled.is_empty());
            assert!(sampled.len() <= coords.len());
            assert_eq!(sampled.last(), coords.last());
        }
    }

    #[test]
    fn test_revisited_destination_is_not_appended_twice() {
        // Loop route: index 3 equals the final coordinate
        let a = Coordinates::from_lng_lat(1.0, 1.0);
        let b = Coordinates::from_lng_lat(2.0, 2.0);
        let coords = vec![a, b, b, a, b, a];
        // 1km -> target 2 -> step 3 -> indices 0,3; index 5 matches index 3
        let sampled = downsample(&coords, 1_000.0, INTERVAL);
        assert_eq!(sampled, vec![a, a]);
    }

    #[test]
    fn test_bounds_hold_for_many_shapes() {
        for n in 1..60 {
            let coords = line(n);
            for distance in [0.0, 2_999.0, 9_000.0, 45_000.0, 400_000.0] {
                let first = downsample(&coords, distance, INTERVAL);
                let second = downsample(&coords, distance, INTERVAL);
                assert_eq!(first, second, "downsampling must be deterministic");
                assert!(!first.is_empty());
                assert!(first.len() <= n, "n={} distance={}", n, distance);
                assert_eq!(first.last(), coords.last());
                assert_eq!(first[0], coords[0]);
            }
        }
    }
}
