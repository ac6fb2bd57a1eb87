use crate::geo::{geodistance_haversine, GeoPoint};
use decorum::R64;

/// A symmetric distance measure between two values of one type.
///
/// Distances are `R64`: a NaN here is a bug in the caller, not a value to
/// carry through a reduction.
pub trait Distance<T> {
    fn distance(p1: T, p2: T) -> R64;
}

impl Distance<GeoPoint> for GeoPoint {
    fn distance(p1: GeoPoint, p2: GeoPoint) -> R64 {
        R64::from_inner(geodistance_haversine(p1, p2))
    }
}
