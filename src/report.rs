//! Plain-text rendering of a fit.
//!
//! The layout is the line-oriented format downstream tooling expects:
//!
//! ```text
//! 3,0
//! 10.0000,0.5000
//! 0.0000,0.5000
//! ```
//!
//! The first line lists the k-means++ seed indices, comma-separated. Each
//! following line is one final centroid, coordinates fixed to four decimals.
//! Centroid order matches seed order.

use crate::cluster::KmeansFit;

/// Decimal places used for centroid coordinates.
pub const PRECISION: usize = 4;

/// Join indices with commas (`"3,0,7"`).
pub fn format_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// One line per centroid, each coordinate with [`PRECISION`] decimals.
pub fn format_centroids<C: AsRef<[f64]>>(centroids: &[C]) -> String {
    centroids
        .iter()
        .map(|centroid| {
            let line = centroid
                .as_ref()
                .iter()
                .map(|v| format!("{:.*}", PRECISION, v))
                .collect::<Vec<_>>()
                .join(",");
            line + "\n"
        })
        .collect()
}

/// Seed indices line followed by the centroid lines.
pub fn render(fit: &KmeansFit) -> String {
    let mut out = format_indices(fit.initial_indices());
    out.push('\n');
    out.push_str(&format_centroids(fit.centroids()));
    out
}
