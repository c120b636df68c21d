use thiserror::Error;

/// Errors returned by the clustering routines in this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value, including a cluster count outside `1 < k < n`.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A row has a different dimensionality than the rest of the dataset.
    #[error("inconsistent data at row {row}: expected dimension {expected}, found {found}")]
    InconsistentData {
        /// Offending row.
        row: usize,
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("non-finite value at row {row}, column {col}")]
    NonFinite {
        /// Offending row.
        row: usize,
        /// Offending column.
        col: usize,
    },

    /// Every candidate has zero distance to the chosen centroids, so k-means++
    /// has nothing to sample from.
    #[error("degenerate sampling: all distances are zero after choosing {chosen} centroids")]
    DegenerateSampling {
        /// Number of centroids chosen before sampling failed.
        chosen: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
