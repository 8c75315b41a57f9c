/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in kilometers over the mean Earth radius (no
/// ellipsoidal correction). Coordinates are not range-checked here; callers
/// that need a guard apply it before scoring.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
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
    fn test_identical_points_return_zero() {
        let distance = haversine_distance(-23.5505, -46.6333, -23.5505, -46.6333);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_symmetry() {
        let a = haversine_distance(-23.5505, -46.6333, -22.9068, -43.1729);
        let b = haversine_distance(-22.9068, -43.1729, -23.5505, -46.6333);
        assert_eq!(a, b);
    }

    #[test]
    fn test_se_to_paulista() {
        // Praça da Sé to Av. Paulista in São Paulo, roughly 2.5 km
        let distance = haversine_distance(-23.5505, -46.6333, -23.5613, -46.6561);
        assert!(distance > 2.0 && distance < 3.0, "got {} km", distance);
    }

    #[test]
    fn test_sao_paulo_to_rio() {
        // São Paulo to Rio de Janeiro is approximately 360 km
        let distance = haversine_distance(-23.5505, -46.6333, -22.9068, -43.1729);
        assert!((distance - 360.0).abs() < 15.0, "got {} km", distance);
    }

    #[test]
    fn test_antipodal_points() {
        // Antipodes are half the Earth's circumference apart
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance - half_circumference).abs() < 1.0, "got {} km", distance);
    }
}
