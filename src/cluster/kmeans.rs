//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of squares**
//! (WCSS):
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! [`Kmeans`] is the configured estimator; [`Kmeans::fit`] validates the
//! input, seeds centroids with k-means++ ([`super::init`]) and refines them
//! with Lloyd iterations ([`super::lloyd`]).
//!
//! # Parameters
//!
//! | Parameter | Default | Accepted range |
//! |-----------|---------|----------------|
//! | `k`       | -       | `1 < k < n` |
//! | `max_iter`| 300     | `1 < max_iter < 1000` |
//! | `tol`     | 0.0     | finite, `>= 0` |
//! | `seed`    | 0       | any |
//!
//! Every parameter is checked before any work starts; a failed check returns
//! an error and produces no partial output.
//!
//! # Determinism
//!
//! There is no entropy-seeded mode. With the same data and parameters, `fit`
//! returns bit-identical results on every run.

use super::init::{self, DEFAULT_SEED};
use super::lloyd::{self, Termination};
use super::traits::Clustering;
use super::util;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use tracing::info;

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 300;

/// Exclusive upper bound accepted for `max_iter`.
pub const MAX_ITER_LIMIT: usize = 1000;

/// Default convergence tolerance: stop only once no centroid moves at all.
pub const DEFAULT_TOL: f64 = 0.0;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum update passes.
    max_iter: usize,
    /// Largest centroid displacement still counted as converged.
    tol: f64,
    /// Seed for k-means++.
    seed: u64,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            seed: DEFAULT_SEED,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set random seed for k-means++.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Configured iteration cap.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Configured convergence tolerance.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn validate_params(&self) -> Result<()> {
        if self.k <= 1 {
            return Err(Error::InvalidArgument {
                name: "k",
                message: "must satisfy 1 < k < n",
            });
        }
        if self.max_iter <= 1 || self.max_iter >= MAX_ITER_LIMIT {
            return Err(Error::InvalidArgument {
                name: "max_iter",
                message: "must satisfy 1 < max_iter < 1000",
            });
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(Error::InvalidArgument {
                name: "tol",
                message: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Validate `data`, then seed and refine.
    pub fn fit<R: AsRef<[f64]>>(&self, data: &[R]) -> Result<KmeansFit> {
        self.validate_params()?;
        let data = Dataset::from_rows(data)?;
        self.fit_dataset(&data)
    }

    /// Seed and refine on an already-validated dataset.
    pub fn fit_dataset(&self, data: &Dataset) -> Result<KmeansFit> {
        self.validate_params()?;
        if self.k >= data.len() {
            return Err(Error::InvalidArgument {
                name: "k",
                message: "must satisfy 1 < k < n",
            });
        }

        info!(
            n = data.len(),
            dim = data.dim(),
            k = self.k,
            max_iter = self.max_iter,
            tol = self.tol,
            seed = self.seed,
            "starting k-means"
        );

        let seeding = init::seed_centroids(data, self.k, self.seed)?;
        let refined = lloyd::refine(data, seeding.centroids, self.max_iter, self.tol)?;

        Ok(KmeansFit {
            initial_indices: seeding.indices,
            centroids: refined.centroids,
            labels: refined.labels,
            termination: refined.termination,
            empty_clusters: refined.empty_clusters,
            inertia: refined.inertia,
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// A fitted k-means model.
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
    initial_indices: Vec<usize>,
    centroids: Vec<Vec<f64>>,
    labels: Vec<usize>,
    termination: Termination,
    empty_clusters: usize,
    inertia: f64,
}

impl KmeansFit {
    /// Dataset rows chosen by k-means++, in selection order.
    pub fn initial_indices(&self) -> &[usize] {
        &self.initial_indices
    }

    /// Final centroids; `centroids()[c]` evolved from row `initial_indices()[c]`.
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Nearest-centroid label for every training row.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Why refinement stopped.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Number of update passes performed.
    pub fn iterations(&self) -> usize {
        self.termination.iterations()
    }

    /// Whether refinement converged before the cap.
    pub fn converged(&self) -> bool {
        self.termination.is_converged()
    }

    /// Sum of squared distances from each training row to its centroid.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// How many times a centroid was left without members during refinement.
    pub fn empty_clusters(&self) -> usize {
        self.empty_clusters
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Index of the centroid nearest to `point`.
    pub fn predict(&self, point: &[f64]) -> Result<usize> {
        let expected = self.centroids.first().map_or(0, Vec::len);
        if point.len() != expected {
            return Err(Error::InconsistentData {
                row: 0,
                expected,
                found: point.len(),
            });
        }
        if let Some(col) = point.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFinite { row: 0, col });
        }
        Ok(util::nearest(point, &self.centroids).0)
    }
}
