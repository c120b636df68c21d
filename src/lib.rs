//! Seeded k-means clustering.
//!
//! `kmpp` clusters a rectangular dataset of `f64` vectors with k-means++
//! seeding followed by Lloyd refinement. Runs are reproducible: the same
//! data, parameters and seed always give the same result.
//!
//! - [`Dataset`]: validated row-major input (consistent dimension, finite values)
//! - [`cluster`]: seeding, refinement and the [`Kmeans`] estimator
//! - [`report`]: the line-oriented text rendering of a fit
//!
//! Progress is reported through `tracing` events; install a subscriber to see
//! per-iteration shifts, empty-cluster warnings and termination reasons.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod dataset;
pub mod error;
pub mod report;

pub use cluster::{Clustering, Kmeans, KmeansFit, Refinement, Seeding, Termination};
pub use dataset::Dataset;
pub use error::{Error, Result};
