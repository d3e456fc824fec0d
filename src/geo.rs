//! Great-circle distance between two latitude/longitude points.

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres. All inputs in degrees.
///
/// Any real values are accepted; out-of-range degrees wrap through the
/// trigonometric functions.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // ---
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push sqrt(a) a hair past 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_zero_distance() {
        // ---
        assert_eq!(distance_km(45.0, -75.0, 45.0, -75.0), 0.0);
    }

    #[test]
    fn test_symmetry() {
        // ---
        let points = [
            (45.0, -75.0),
            (45.00004, -75.00003),
            (-33.8688, 151.2093),
            (51.5074, -0.1278),
            (89.9, 179.9),
        ];
        for &(lat1, lon1) in &points {
            for &(lat2, lon2) in &points {
                let ab = distance_km(lat1, lon1, lat2, lon2);
                let ba = distance_km(lat2, lon2, lat1, lon1);
                assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
            }
        }
    }

    #[test]
    fn test_known_distances() {
        // ---
        // One degree of latitude is R * pi / 180
        let one_degree = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((one_degree - 111.19492664).abs() < 1e-6);

        // London to Paris, roughly 343.5 km
        let london_paris = distance_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((london_paris - 343.5).abs() < 1.0);
    }

    #[test]
    fn test_antipodal_points_are_finite() {
        // ---
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_degrees_wrap() {
        // ---
        let d = distance_km(45.0, -75.0, 45.0, 285.0);
        assert!(d < 1e-6);
    }
}
