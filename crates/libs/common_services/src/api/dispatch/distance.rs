use common_types::GeoPoint;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Great-circle distance between two points in miles.
#[must_use]
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair outside [0, 1] for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_MILES * c
}

/// The five-digit prefix of a US zip code (`12345` and `12345-6789` both give 12345).
#[must_use]
pub fn parse_zip(zip: &str) -> Option<u32> {
    let prefix = zip.trim().get(..5)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Numeric zip-code proximity: `|a - b|`, capped.
///
/// This is not a geographic distance. Neighbouring zip codes are usually numerically
/// close, which makes it good enough as a fallback ordering key when coordinates are
/// missing.
#[must_use]
pub fn zip_distance(a: &str, b: &str, cap: u32) -> Option<u32> {
    let (a, b) = (parse_zip(a)?, parse_zip(b)?);
    Some(a.abs_diff(b).min(cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYC: GeoPoint = GeoPoint::new(40.7128, -74.0060);
    const LA: GeoPoint = GeoPoint::new(34.0522, -118.2437);
    const BOSTON: GeoPoint = GeoPoint::new(42.3601, -71.0589);

    #[test]
    fn haversine_matches_known_distance() {
        let d = haversine_miles(NYC, LA);
        assert!((d - 2445.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn haversine_is_symmetric_and_non_negative() {
        let points = [NYC, LA, BOSTON, GeoPoint::new(-33.87, 151.21)];
        for a in points {
            assert!(haversine_miles(a, a).abs() < 1e-9);
            for b in points {
                let ab = haversine_miles(a, b);
                let ba = haversine_miles(b, a);
                assert!(ab >= 0.0);
                assert!((ab - ba).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn zip_prefix_parsing() {
        assert_eq!(parse_zip("02139"), Some(2139));
        assert_eq!(parse_zip("10001-1234"), Some(10001));
        assert_eq!(parse_zip(" 10001 "), Some(10001));
        assert_eq!(parse_zip("1000"), None);
        assert_eq!(parse_zip("ABCDE"), None);
        assert_eq!(parse_zip(""), None);
    }

    #[test]
    fn zip_distance_is_capped_and_symmetric() {
        assert_eq!(zip_distance("10001", "10005", 50), Some(4));
        assert_eq!(zip_distance("10005", "10001", 50), Some(4));
        assert_eq!(zip_distance("10001", "90210", 50), Some(50));
        assert_eq!(zip_distance("10001", "10001", 50), Some(0));
        assert_eq!(zip_distance("10001", "n/a", 50), None);
    }
}
