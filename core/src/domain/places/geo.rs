pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two WGS84 points.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert_eq!(haversine_km(24.9684, 121.1955, 24.9684, 121.1955), 0.0);
    }

    #[test]
    fn known_distances() {
        let cases = [
            // one degree of latitude
            ((0.0, 0.0, 1.0, 0.0), 111.19),
            // NCU to Taipei Main Station
            ((24.9684, 121.1955, 25.0478, 121.5170), 33.6),
        ];

        for ((lat1, lng1, lat2, lng2), expected) in cases {
            let distance = haversine_km(lat1, lng1, lat2, lng2);
            assert!(
                (distance - expected).abs() < 0.5,
                "expected about {expected} km, got {distance}"
            );
        }
    }

    #[test]
    fn is_symmetric() {
        let there = haversine_km(24.9684, 121.1955, 24.9577, 121.2252);
        let back = haversine_km(24.9577, 121.2252, 24.9684, 121.1955);
        assert!((there - back).abs() < 1e-9);
    }
}
