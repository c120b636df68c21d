//! k-means++ seeding.
//!
//! # The Algorithm (Arthur & Vassilvitskii, 2007)
//!
//! 1. Choose the first centroid uniformly at random from the data.
//! 2. For every point compute D(x), the distance to the nearest centroid
//!    chosen so far.
//! 3. Choose the next centroid with probability proportional to D(x).
//! 4. Repeat until k centroids are chosen.
//!
//! The weights here are the plain Euclidean distance D(x), not D(x)². Points
//! that coincide with an already-chosen centroid have weight 0 and can never
//! be picked, so the chosen *indices* are always distinct. Duplicate rows can
//! still make two centroids equal in value.
//!
//! ## Degenerate input
//!
//! When every remaining point coincides with a chosen centroid (for example,
//! all rows are identical, or k exceeds the number of distinct rows) the
//! weights sum to zero. That is reported as [`Error::DegenerateSampling`]
//! instead of dividing by zero.
//!
//! Distances use the scaled (`hypot`-style) form, so coordinates up to
//! roughly `f64::MAX / 2` are handled. Weights are normalized by their
//! maximum before sampling. Rows whose coordinate *differences* exceed
//! `f64::MAX` are rejected with [`Error::InvalidArgument`].
//!
//! ## Complexity
//!
//! D(x) is updated incrementally against the newest centroid only, so seeding
//! costs O(k·n·d) distance work and O(n) extra memory.

use super::util;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use tracing::debug;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0;

/// Result of k-means++ seeding: chosen row indices and copies of those rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Seeding {
    /// Indices into the dataset, in selection order.
    pub indices: Vec<usize>,
    /// `centroids[i] == data.row(indices[i])`.
    pub centroids: Vec<Vec<f64>>,
}

/// Run k-means++ with a fresh [`StdRng`] seeded from `seed`.
///
/// Identical `(data, k, seed)` always produce identical output.
pub fn seed_centroids(data: &Dataset, k: usize, seed: u64) -> Result<Seeding> {
    let mut rng = StdRng::seed_from_u64(seed);
    let indices = kmeans_plus_plus(data, k, &mut rng)?;
    let centroids = data.gather(&indices);
    Ok(Seeding { indices, centroids })
}

/// Pick `k` distinct row indices of `data` using k-means++ weighting.
///
/// Requires `1 < k < data.len()`.
pub fn kmeans_plus_plus<R: Rng>(
    data: &Dataset,
    k: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let n = data.len();
    if k <= 1 || k >= n {
        return Err(Error::InvalidArgument {
            name: "k",
            message: "must satisfy 1 < k < n",
        });
    }

    let mut chosen = Vec::with_capacity(k);
    let mut min_dist = vec![f64::INFINITY; n];

    let mut latest = rng.random_range(0..n);
    chosen.push(latest);
    debug!(index = latest, "k-means++ picked first centroid");

    while chosen.len() < k {
        let newest = data.row(latest);
        for (d, row) in min_dist.iter_mut().zip(data.rows()) {
            let dist = util::euclidean(row, newest);
            if dist < *d {
                *d = dist;
            }
        }

        // Normalize by the largest weight so the cumulative total stays finite.
        let max = min_dist.iter().copied().fold(0.0f64, f64::max);
        if !max.is_finite() {
            return Err(Error::InvalidArgument {
                name: "data",
                message: "coordinate differences overflow f64",
            });
        }
        if max == 0.0 {
            return Err(Error::DegenerateSampling {
                chosen: chosen.len(),
            });
        }
        let weights = WeightedIndex::new(min_dist.iter().map(|d| d / max)).map_err(|_| {
            Error::InvalidArgument {
                name: "data",
                message: "distances cannot be sampled",
            }
        })?;
        latest = weights.sample(rng);
        debug_assert!(!chosen.contains(&latest));
        debug!(
            index = latest,
            weight = min_dist[latest],
            picked = chosen.len() + 1,
            "k-means++ picked centroid"
        );
        chosen.push(latest);
    }

    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid() -> Dataset {
        let rows: Vec<Vec<f64>> = (0..30)
            .map(|i| vec![(i % 6) as f64 * 3.0, (i / 6) as f64 * 2.0])
            .collect();
        Dataset::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_seeding_returns_k_distinct_rows() {
        let data = grid();
        let seeding = seed_centroids(&data, 7, 11).unwrap();

        assert_eq!(seeding.indices.len(), 7);
        assert_eq!(seeding.centroids.len(), 7);

        let unique: HashSet<_> = seeding.indices.iter().collect();
        assert_eq!(unique.len(), 7, "indices must not repeat");

        for (&idx, centroid) in seeding.indices.iter().zip(&seeding.centroids) {
            assert!(idx < data.len());
            assert_eq!(centroid.as_slice(), data.row(idx));
        }
    }

    #[test]
    fn test_seeding_deterministic_with_seed() {
        let data = grid();
        let a = seed_centroids(&data, 5, 42).unwrap();
        let b = seed_centroids(&data, 5, 42).unwrap();
        assert_eq!(a, b, "same seed should give same centroids");
    }

    #[test]
    fn test_seeding_never_picks_coincident_point() {
        // After the first pick, the only non-zero weight belongs to the far point.
        let rows = vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![0.0, 0.0], vec![9.0, 9.0]];
        let data = Dataset::from_rows(&rows).unwrap();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = kmeans_plus_plus(&data, 2, &mut rng).unwrap();
            if picked[0] == 3 {
                assert!(picked[1] < 3);
            } else {
                assert_eq!(picked[1], 3);
            }
        }
    }

    #[test]
    fn test_seeding_all_identical_is_degenerate() {
        let rows = vec![vec![1.5, -2.0]; 5];
        let data = Dataset::from_rows(&rows).unwrap();
        assert_eq!(
            seed_centroids(&data, 2, 0),
            Err(Error::DegenerateSampling { chosen: 1 })
        );
    }

    #[test]
    fn test_seeding_more_clusters_than_distinct_points() {
        let rows = vec![vec![0.0], vec![0.0], vec![0.0], vec![4.0]];
        let data = Dataset::from_rows(&rows).unwrap();
        assert_eq!(
            seed_centroids(&data, 3, 7),
            Err(Error::DegenerateSampling { chosen: 2 })
        );
    }

    #[test]
    fn test_seeding_cluster_count_bounds() {
        let data = grid();
        for k in [0, 1, data.len(), data.len() + 1] {
            assert!(matches!(
                seed_centroids(&data, k, 0),
                Err(Error::InvalidArgument { name: "k", .. })
            ));
        }
    }

    #[test]
    fn test_seeding_large_magnitudes() {
        let rows = vec![vec![0.0], vec![1e200], vec![2e200], vec![3e200]];
        let data = Dataset::from_rows(&rows).unwrap();

        for seed in 0..10 {
            let seeding = seed_centroids(&data, 2, seed).unwrap();
            assert_ne!(seeding.indices[0], seeding.indices[1]);
            for (&idx, centroid) in seeding.indices.iter().zip(&seeding.centroids) {
                assert_eq!(centroid.as_slice(), data.row(idx));
            }
        }

        let wide: Vec<Vec<f64>> = (0..50).map(|i| vec![1e300 * (i % 2) as f64, -1e300]).collect();
        let data = Dataset::from_rows(&wide).unwrap();
        assert_eq!(seed_centroids(&data, 2, 5).unwrap().indices.len(), 2);
    }

    #[test]
    fn test_seeding_overflowing_differences_error() {
        // Any first pick leaves a row more than f64::MAX away.
        let rows = vec![vec![-1e308], vec![1e308], vec![1e308]];
        let data = Dataset::from_rows(&rows).unwrap();
        for seed in 0..5 {
            assert!(matches!(
                seed_centroids(&data, 2, seed),
                Err(Error::InvalidArgument { name: "data", .. })
            ));
        }
    }

    #[test]
    fn test_seeding_k_just_below_n() {
        let rows: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let data = Dataset::from_rows(&rows).unwrap();
        let seeding = seed_centroids(&data, 5, 3).unwrap();
        let unique: HashSet<_> = seeding.indices.iter().collect();
        assert_eq!(unique.len(), 5);
    }
}
