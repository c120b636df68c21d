//! Lloyd refinement.
//!
//! Starting from a set of centroids, alternate two full passes over the data:
//!
//! 1. **Assign**: every point goes to its nearest centroid (squared Euclidean
//!    distance; ties go to the lowest centroid index).
//! 2. **Update**: every centroid moves to the mean of the points assigned to it.
//!
//! Refinement stops as soon as no centroid moved farther than `tol`
//! ([`Termination::Converged`]), or after `max_iter` update passes
//! ([`Termination::IterationCapped`]). Both outcomes return the same shape.
//!
//! ## Empty clusters
//!
//! A centroid that receives no points during Assign keeps its previous
//! position for that iteration (its displacement counts as zero). This never
//! produces NaN and never fails; each occurrence is counted in
//! [`Refinement::empty_clusters`] and logged at `warn` level.
//!
//! ## Large magnitudes
//!
//! Distances use the scaled Euclidean form, so they stay finite for any pair
//! of rows whose coordinate differences fit in `f64`. A row that is farther
//! than `f64::MAX` from every centroid ties everywhere and goes to centroid 0.
//! When a cluster's coordinate sum overflows, its mean is recomputed from
//! terms divided by the member count first, so centroids never become
//! infinite or NaN.
//!
//! ## Ordering
//!
//! Centroid identity is positional: `centroids[c]` in the output evolved from
//! `initial[c]` in the input. Nothing is re-sorted.

use super::util;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Why refinement stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every centroid moved at most `tol` during the last update.
    Converged {
        /// Update passes performed, including the final one.
        iterations: usize,
    },
    /// The iteration cap was reached before convergence.
    IterationCapped {
        /// Update passes performed (equals the cap).
        iterations: usize,
    },
}

impl Termination {
    /// Number of update passes performed.
    pub fn iterations(&self) -> usize {
        match *self {
            Termination::Converged { iterations } | Termination::IterationCapped { iterations } => {
                iterations
            }
        }
    }

    /// Whether refinement converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, Termination::Converged { .. })
    }
}

/// Output of [`refine`].
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    /// Final centroids, in the same order as the initial ones.
    pub centroids: Vec<Vec<f64>>,
    /// `labels[i]` is the index of the centroid nearest to row `i`.
    pub labels: Vec<usize>,
    /// Why the loop stopped.
    pub termination: Termination,
    /// Number of (iteration, centroid) pairs where a centroid had no members.
    pub empty_clusters: usize,
    /// Sum of squared distances from each row to its assigned centroid.
    pub inertia: f64,
}

/// Refine `initial` centroids against `data` with Lloyd's algorithm.
///
/// `max_iter` must be at least 1 and `tol` must be finite and non-negative.
pub fn refine(
    data: &Dataset,
    initial: Vec<Vec<f64>>,
    max_iter: usize,
    tol: f64,
) -> Result<Refinement> {
    if initial.is_empty() {
        return Err(Error::InvalidArgument {
            name: "centroids",
            message: "at least one initial centroid is required",
        });
    }
    if max_iter == 0 {
        return Err(Error::InvalidArgument {
            name: "max_iter",
            message: "must be at least 1",
        });
    }
    if !tol.is_finite() || tol < 0.0 {
        return Err(Error::InvalidArgument {
            name: "tol",
            message: "must be finite and non-negative",
        });
    }
    for (row, centroid) in initial.iter().enumerate() {
        if centroid.len() != data.dim() {
            return Err(Error::InconsistentData {
                row,
                expected: data.dim(),
                found: centroid.len(),
            });
        }
        if let Some(col) = centroid.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite { row, col });
        }
    }

    let k = initial.len();
    let d = data.dim();
    let mut centroids = initial;
    let mut next = vec![vec![0.0f64; d]; k];
    let mut counts = vec![0usize; k];
    let mut labels = vec![0usize; data.len()];
    let mut empty_clusters = 0usize;
    let mut termination = Termination::IterationCapped {
        iterations: max_iter,
    };

    for iteration in 1..=max_iter {
        assign(data, &centroids, &mut labels);

        // Update: sum members, then divide.
        for (sum, count) in next.iter_mut().zip(counts.iter_mut()) {
            sum.fill(0.0);
            *count = 0;
        }
        for (row, &c) in data.rows().zip(labels.iter()) {
            counts[c] += 1;
            for (acc, &x) in next[c].iter_mut().zip(row) {
                *acc += x;
            }
        }

        let mut max_shift = 0.0f64;
        for (c, (sum, &count)) in next.iter_mut().zip(counts.iter()).enumerate() {
            if count == 0 {
                empty_clusters += 1;
                warn!(
                    iteration,
                    cluster = c,
                    "empty cluster, keeping previous centroid"
                );
                sum.copy_from_slice(&centroids[c]);
                continue;
            }
            let count = count as f64;
            if sum.iter().all(|v| v.is_finite()) {
                for v in sum.iter_mut() {
                    *v /= count;
                }
            } else {
                // The plain sum overflowed: average pre-divided terms instead.
                sum.fill(0.0);
                for (row, _) in data.rows().zip(labels.iter()).filter(|&(_, &l)| l == c) {
                    for (acc, &x) in sum.iter_mut().zip(row) {
                        *acc += x / count;
                    }
                }
            }
            max_shift = max_shift.max(util::euclidean(&centroids[c], sum));
        }

        std::mem::swap(&mut centroids, &mut next);

        debug!(iteration, max_shift, tol, "lloyd iteration complete");

        if max_shift <= tol {
            termination = Termination::Converged {
                iterations: iteration,
            };
            break;
        }
    }

    match termination {
        Termination::Converged { iterations } => info!(iterations, "k-means converged"),
        Termination::IterationCapped { iterations } => {
            warn!(iterations, "k-means hit the iteration cap before converging")
        }
    }

    // Labels must describe the centroids being returned, not the previous ones.
    assign(data, &centroids, &mut labels);
    let inertia = data
        .rows()
        .zip(labels.iter())
        .map(|(row, &c)| util::squared_euclidean(row, &centroids[c]))
        .sum::<f64>();

    Ok(Refinement {
        centroids,
        labels,
        termination,
        empty_clusters,
        inertia,
    })
}

/// Assign every row to its nearest centroid.
pub(crate) fn assign(data: &Dataset, centroids: &[Vec<f64>], labels: &mut [usize]) {
    debug_assert_eq!(labels.len(), data.len());

    #[cfg(feature = "parallel")]
    labels.par_iter_mut().enumerate().for_each(|(i, label)| {
        *label = util::nearest(data.row(i), centroids).0;
    });

    #[cfg(not(feature = "parallel"))]
    for (label, row) in labels.iter_mut().zip(data.rows()) {
        *label = util::nearest(row, centroids).0;
    }
}
