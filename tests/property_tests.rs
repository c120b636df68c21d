use kmpp::cluster::{refine, seed_centroids, Clustering, Kmeans, Termination};
use kmpp::{Dataset, Error};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn prop_kmeans_all_assigned(
        data in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 3..30),
        k in 2usize..6
    ) {
        // Skip if k >= n
        if k < data.len() {
            let model = Kmeans::new(k).with_seed(42);
            match model.fit_predict(&data) {
                Ok(labels) => {
                    prop_assert_eq!(labels.len(), data.len());
                    for &l in &labels {
                        prop_assert!(l < k);
                    }
                }
                // Only possible when fewer than k distinct rows were drawn.
                Err(Error::DegenerateSampling { .. }) => {}
                Err(e) => prop_assert!(false, "unexpected error: {e}"),
            }
        }
    }

    #[test]
    fn prop_seeding_picks_distinct_rows(
        data in prop::collection::vec(prop::collection::vec(-100.0f64..100.0, 3), 4..40),
        k in 2usize..8,
        seed in any::<u64>()
    ) {
        prop_assume!(k < data.len());
        let ds = Dataset::from_rows(&data).unwrap();

        if let Ok(seeding) = seed_centroids(&ds, k, seed) {
            prop_assert_eq!(seeding.indices.len(), k);
            let unique: HashSet<_> = seeding.indices.iter().collect();
            prop_assert_eq!(unique.len(), k);
            for (&idx, centroid) in seeding.indices.iter().zip(&seeding.centroids) {
                prop_assert_eq!(centroid.as_slice(), data[idx].as_slice());
            }
        }
    }

    #[test]
    fn prop_fit_is_reproducible(
        data in prop::collection::vec(prop::collection::vec(-5.0f64..5.0, 2), 5..25),
        seed in any::<u64>()
    ) {
        let model = Kmeans::new(3).with_seed(seed);
        prop_assert_eq!(model.fit(&data), model.fit(&data));
    }

    #[test]
    fn prop_refine_stops_within_cap(
        data in prop::collection::vec(prop::collection::vec(-5.0f64..5.0, 2), 5..40),
        cap in 1usize..6
    ) {
        let ds = Dataset::from_rows(&data).unwrap();
        let init = ds.gather(&[0, 1, 2]);
        let out = refine(&ds, init, cap, 0.0).unwrap();
        prop_assert!(out.termination.iterations() <= cap);
        prop_assert!(out.centroids.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn prop_converged_centroids_are_a_fixed_point(
        data in prop::collection::vec(prop::collection::vec(-5.0f64..5.0, 2), 6..30),
        seed in any::<u64>()
    ) {
        let model = Kmeans::new(2).with_tol(0.0).with_max_iter(999).with_seed(seed);
        if let Ok(fit) = model.fit(&data) {
            if fit.converged() {
                let ds = Dataset::from_rows(&data).unwrap();
                let again = refine(&ds, fit.centroids().to_vec(), 2, 0.0).unwrap();
                prop_assert_eq!(again.termination, Termination::Converged { iterations: 1 });
                prop_assert_eq!(again.centroids.as_slice(), fit.centroids());
            }
        }
    }
}
