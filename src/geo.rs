mod geo_point;
mod geodistance;

pub use geo_point::GeoPoint;
pub use geodistance::{geodistance_haversine, haversine_over_pairs, EARTH_RADIUS_KM};
