//! K-means on a small joined table, printed in the line-oriented report format.
//!
//! Run with `RUST_LOG=debug` to see seeding picks and per-iteration shifts.

use kmpp::{report, Kmeans};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three well-separated clusters in 2D.
    let data: Vec<Vec<f64>> = vec![
        // Cluster A (near origin)
        vec![0.0, 0.0],
        vec![0.1, 0.2],
        vec![0.2, 0.1],
        vec![-0.1, 0.1],
        // Cluster B (near (5, 5))
        vec![5.0, 5.0],
        vec![5.1, 4.9],
        vec![4.9, 5.1],
        vec![5.2, 5.2],
        // Cluster C (near (10, 0))
        vec![10.0, 0.0],
        vec![10.1, 0.1],
        vec![9.9, -0.1],
        vec![10.2, 0.2],
    ];

    let fit = Kmeans::new(3).with_max_iter(300).with_tol(0.0).fit(&data)?;

    print!("{}", report::render(&fit));

    eprintln!(
        "\n{:?} after {} iterations, inertia {:.4}",
        fit.termination(),
        fit.iterations(),
        fit.inertia()
    );
    for (i, label) in fit.labels().iter().enumerate() {
        eprintln!(
            "  point {:2} ({:5.1}, {:5.1}) => cluster {}",
            i, data[i][0], data[i][1], label
        );
    }
    Ok(())
}
