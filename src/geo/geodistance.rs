use super::GeoPoint;

/// Mean earth radius in kilometers, the sphere all distances live on.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two geopoints in kilometers.
/// Done using formula from https://en.wikipedia.org/wiki/Haversine_formula.
/// This is only problematic when the points are antipodal to one another.
pub fn geodistance_haversine(point_a: GeoPoint, point_b: GeoPoint) -> f64 {
    let d_lat = point_b.lat_rad() - point_a.lat_rad();
    let d_lng = point_b.lng_rad() - point_a.lng_rad();

    let h = (d_lat / 2.0).sin().powi(2)
        + point_a.lat_rad().cos() * point_b.lat_rad().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distances for a whole pair collection, one value per pair in input order.
pub fn haversine_over_pairs(pairs: &[(GeoPoint, GeoPoint)]) -> Vec<f64> {
    pairs
        .iter()
        .map(|&(a, b)| geodistance_haversine(a, b))
        .collect()
}
