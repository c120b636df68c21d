//! K-means clustering for dense `f64` vectors.
//!
//! The pipeline has two stages, run strictly in sequence:
//!
//! 1. **Seeding** ([`kmeans_plus_plus`], [`seed_centroids`]): choose k rows of
//!    the dataset as starting centroids, biased toward rows far from the
//!    centroids already chosen.
//! 2. **Refinement** ([`refine`]): Lloyd iterations. Assign every row to the
//!    nearest centroid, move each centroid to the mean of its rows, repeat
//!    until nothing moves more than `tol` or the iteration cap is hit.
//!
//! [`Kmeans`] wires both stages together behind a builder and returns a
//! [`KmeansFit`].
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! ## Usage
//!
//! ```rust
//! use kmpp::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![0.0, 0.2],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let fit = Kmeans::new(2).with_seed(7).fit(&data).unwrap();
//! assert_eq!(fit.centroids().len(), 2);
//! assert_eq!(fit.initial_indices().len(), 2);
//!
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[3]);
//! ```

mod init;
mod kmeans;
mod lloyd;
mod traits;
mod util;

pub use init::{kmeans_plus_plus, seed_centroids, Seeding, DEFAULT_SEED};
pub use kmeans::{Kmeans, KmeansFit, DEFAULT_MAX_ITER, DEFAULT_TOL, MAX_ITER_LIMIT};
pub use lloyd::{refine, Refinement, Termination};
pub use traits::Clustering;
