#[inline]
pub(crate) fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Euclidean distance, scaled by the largest coordinate difference so the
/// squares cannot overflow (the `hypot` trick).
///
/// Returns `f64::INFINITY` only when a single coordinate difference already
/// exceeds `f64::MAX`.
#[inline]
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let scale = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (x - y) / scale;
            d * d
        })
        .sum();
    scale * sum.sqrt()
}

/// Index of the nearest centroid and its distance.
///
/// Ties resolve to the lowest centroid index. A point whose distance to every
/// centroid overflows goes to centroid 0.
#[inline]
pub(crate) fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = euclidean(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    (best, best_dist)
}
