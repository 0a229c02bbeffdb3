//! Great-circle distance between two coordinates (haversine).
//! Pure math, no I/O, suitable for unit tests and reuse.

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters between two (lat, lon) pairs given in degrees.
///
/// Always finite and non-negative for numeric inputs. NaN inputs are a caller
/// contract violation and are not handled specially.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        assert_eq!(distance_meters(44.7866, 20.4489, 44.7866, 20.4489), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        // Arc length of 1° on a great circle: R * π / 180 ≈ 111_194.93 m.
        let d = distance_meters(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn symmetric_in_its_endpoints() {
        let a = distance_meters(44.7866, 20.4489, 44.7900, 20.4500);
        let b = distance_meters(44.7900, 20.4500, 44.7866, 20.4489);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn belgrade_reference_pair_is_under_400_meters() {
        // The pair used across the integration suite: ~388 m apart.
        let d = distance_meters(44.7866, 20.4489, 44.7900, 20.4500);
        assert!(d > 350.0 && d < 400.0, "got {d}");
    }
}
