use crate::models::Coordinates;

/// Parse input of the exact form `<lng>,<lat>` where both parts are decimal
/// literals with an optional leading minus and a mandatory decimal point,
/// e.g. `73.0479,33.6844`. Surrounding whitespace is ignored.
pub fn parse_literal_coordinates(input: &str) -> Option<Coordinates> {
    let (lng, lat) = input.trim().split_once(',')?;
    if !is_decimal_literal(lng) || !is_decimal_literal(lat) {
        return None;
    }
    Some(Coordinates::from_lng_lat(lng.parse().ok()?, lat.parse().ok()?))
}

fn is_decimal_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    match digits.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && !frac.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_lng_lat_pair() {
        let coords = parse_literal_coordinates("73.0479,33.6844").unwrap();
        assert_eq!(coords.lng, 73.0479);
        assert_eq!(coords.lat, 33.6844);

        let negative = parse_literal_coordinates("  -0.1278,-51.5074 ").unwrap();
        assert_eq!(negative.lng, -0.1278);
        assert_eq!(negative.lat, -51.5074);
    }

    #[test]
    fn test_rejects_non_literal_input() {
        for input in [
            "Islamabad",
            "73,33",           // decimal point required
            "73.0479, 33.6844", // no inner whitespace
            "+73.0,33.0",      // only a minus sign is allowed
            "73.0479,33.6844,1.0",
            ".5,1.0",
            "1.,2.0",
            "",
        ] {
            assert!(
                parse_literal_coordinates(input).is_none(),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_out_of_range_literal_is_accepted() {
        let coords = parse_literal_coordinates("200.0,-95.5").unwrap();
        assert_eq!(coords.lng, 200.0);
        assert_eq!(coords.lat, -95.5);
    }
}
