use serde::Serialize;
use std::cmp::Ordering;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

/// A geographic coordinate pair in degrees, latitude first.
///
/// Identity is bitwise: two points compare and hash equal only when both
/// coordinate values are bit-identical. Pair deduplication in the statistics
/// pipeline relies on this.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    pub fn from_radians(lat_rad: f64, lng_rad: f64) -> Self {
        GeoPoint {
            lat: radians_to_degrees(lat_rad),
            lng: radians_to_degrees(lng_rad),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat_rad(&self) -> f64 {
        degrees_to_radians(self.lat)
    }

    pub fn lng_rad(&self) -> f64 {
        degrees_to_radians(self.lng)
    }
}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        (self.lat.to_bits(), self.lng.to_bits()).hash(hasher)
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lng.to_bits() == other.lng.to_bits()
    }
}

impl Eq for GeoPoint {}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeoPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lat
            .total_cmp(&other.lat)
            .then(self.lng.total_cmp(&other.lng))
    }
}

fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use std::collections::HashSet;

    #[test]
    fn from_degrees_works() {
        let point = GeoPoint::from_degrees(12.345, 54.321);

        assert_eq!(point.lat(), 12.345);
        assert_eq!(point.lng(), 54.321);
    }

    #[test]
    fn from_radians_works() {
        let point = GeoPoint::from_radians(PI / 2.0, -PI);

        assert!(approx_eq!(f64, point.lat(), 90.0));
        assert!(approx_eq!(f64, point.lng(), -180.0));
    }

    #[test]
    fn rad_accessors_work() {
        let point = GeoPoint::from_degrees(180.0, -90.0);

        assert!(approx_eq!(f64, point.lat_rad(), PI));
        assert!(approx_eq!(f64, point.lng_rad(), -PI / 2.0));
    }

    #[test]
    fn identical_bits_are_equal() {
        let a = GeoPoint::from_degrees(52.516667, 13.388890);
        let b = GeoPoint::from_degrees(52.516667, 13.388890);

        assert_eq!(a, b);
    }

    #[test]
    fn nearby_values_are_distinct() {
        let a = GeoPoint::from_degrees(0.1 + 0.2, 0.0);
        let b = GeoPoint::from_degrees(0.3, 0.0);

        assert_ne!(a, b);
    }

    #[test]
    fn hashing_follows_equality() {
        let mut set = HashSet::new();
        set.insert(GeoPoint::from_degrees(55.75, 37.616667));
        set.insert(GeoPoint::from_degrees(55.75, 37.616667));
        set.insert(GeoPoint::from_degrees(51.507222, -0.1275));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordering_is_lat_major() {
        let low = GeoPoint::from_degrees(-10.0, 170.0);
        let high = GeoPoint::from_degrees(10.0, -170.0);

        assert!(low < high);
    }
}
