use serde::Serialize;
use std::hash::Hash;

use super::pairs::unique_pairs;
use crate::util::Distance;

/// The reduced pairwise distance statistics, all in kilometers.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct DistanceResult {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub std: f64,
}

/// Reduces the pairwise distances of `points` to minimum, maximum,
/// arithmetic mean and population standard deviation.
///
/// Fewer than two distinct points leave no pairs to measure; the statistics
/// are then reported as all zero rather than as an error.
pub fn distance_statistics<T>(points: &[T]) -> DistanceResult
where
    T: Distance<T> + Copy + Eq + Hash,
{
    let pairs = unique_pairs(points);
    let distances: Vec<f64> = pairs
        .iter()
        .map(|&(a, b)| T::distance(a, b).into_inner())
        .collect();

    reduce(&distances)
}

fn reduce(values: &[f64]) -> DistanceResult {
    if values.is_empty() {
        return DistanceResult::default();
    }

    let count = values.len() as f64;
    let avg = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / count;

    DistanceResult {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg,
        std: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use float_cmp::approx_eq;
    use oorandom::Rand64;

    fn reference_cities() -> Vec<GeoPoint> {
        vec![
            GeoPoint::from_degrees(52.516667, 13.388890),
            GeoPoint::from_degrees(51.507222, -0.1275),
            GeoPoint::from_degrees(55.75, 37.616667),
        ]
    }

    fn random_points(count: usize, seed: u128) -> Vec<GeoPoint> {
        let mut rng = Rand64::new(seed);
        (0..count)
            .map(|_| {
                GeoPoint::from_degrees(
                    rng.rand_float() * 180.0 - 90.0,
                    rng.rand_float() * 360.0 - 180.0,
                )
            })
            .collect()
    }

    #[test]
    fn reference_scenario_reproduces() {
        let result = distance_statistics(&reference_cities());

        assert!(approx_eq!(f64, result.min, 930.4536241898576, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.max, 2500.543166926314, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.avg, 1680.302029758481, epsilon = 1e-9));
        assert!(approx_eq!(f64, result.std, 642.9160886404449, epsilon = 1e-9));
    }

    #[test]
    fn empty_input_zero_fills() {
        let result = distance_statistics::<GeoPoint>(&[]);

        assert_eq!(result, DistanceResult::default());
    }

    #[test]
    fn single_point_zero_fills() {
        let result = distance_statistics(&[GeoPoint::from_degrees(55.75, 37.616667)]);

        assert_eq!(result, DistanceResult::default());
    }

    #[test]
    fn duplicate_point_contributes_one_pair() {
        let p = GeoPoint::from_degrees(52.516667, 13.388890);
        let q = GeoPoint::from_degrees(51.507222, -0.1275);

        let result = distance_statistics(&[p, p, q]);
        let expected = crate::geo::geodistance_haversine(p, q);

        assert_eq!(result.min, expected);
        assert_eq!(result.max, expected);
        assert_eq!(result.avg, expected);
        assert_eq!(result.std, 0.0);
    }

    #[test]
    fn identical_points_zero_fill() {
        let p = GeoPoint::from_degrees(55.75, 37.616667);

        assert_eq!(distance_statistics(&[p, p]), DistanceResult::default());
    }

    #[test]
    fn statistics_are_bounded() {
        let result = distance_statistics(&random_points(20, 12345));

        assert!(result.min >= 0.0);
        assert!(result.min <= result.avg);
        assert!(result.avg <= result.max);
        assert!(result.std >= 0.0);
    }

    #[test]
    fn reduce_matches_hand_computation() {
        let result = reduce(&[2.0, 4.0]);

        assert_eq!(result.min, 2.0);
        assert_eq!(result.max, 4.0);
        assert_eq!(result.avg, 3.0);
        assert_eq!(result.std, 1.0);
    }

    #[test]
    fn std_uses_population_divisor() {
        // Sample std of [1, 2, 3, 4] would be ~1.29; population std is
        // sqrt(5/4).
        let result = reduce(&[1.0, 2.0, 3.0, 4.0]);

        assert!(approx_eq!(f64, result.std, (5.0f64 / 4.0).sqrt()));
    }

    #[test]
    fn serializes_with_all_four_fields() {
        let json = serde_json::to_value(distance_statistics(&reference_cities())).unwrap();

        for field in &["min", "max", "avg", "std"] {
            assert!(json.get(*field).map(|v| v.is_f64()).unwrap_or(false));
        }
    }
}
