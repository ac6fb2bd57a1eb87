use std::collections::HashSet;
use std::hash::Hash;

/// Enumerates the unique unordered pairs of distinct point values.
///
/// Positions holding identical values collapse into one point before
/// enumeration, so `[P, P, Q]` produces the single pair `(P, Q)`. Distinct
/// values keep their first-appearance order and pairs come out in index
/// order, each pair once with the earlier value first.
pub fn unique_pairs<T>(points: &[T]) -> Vec<(T, T)>
where
    T: Copy + Eq + Hash,
{
    let mut seen = HashSet::with_capacity(points.len());
    let mut distinct = Vec::with_capacity(points.len());
    for &point in points {
        if seen.insert(point) {
            distinct.push(point);
        }
    }

    let mut pairs = Vec::with_capacity(distinct.len() * distinct.len().saturating_sub(1) / 2);
    for (i, &a) in distinct.iter().enumerate() {
        for &b in &distinct[i + 1..] {
            pairs.push((a, b));
        }
    }

    pairs
}
