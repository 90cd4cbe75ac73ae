pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine, mean Earth radius).
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(52.52, 13.405, 52.52, 13.405), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_on_the_equator() {
        let d = distance_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn berlin_to_paris() {
        let d = distance_km(52.5200, 13.4050, 48.8566, 2.3522);
        assert!((d - 877.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let there = distance_km(40.7128, -74.0060, 34.0522, -118.2437);
        let back = distance_km(34.0522, -118.2437, 40.7128, -74.0060);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_degrees_still_yield_a_number() {
        assert!(!distance_km(200.0, 400.0, -100.0, -500.0).is_nan());
    }
}
