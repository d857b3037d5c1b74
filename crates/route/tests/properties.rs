//! Property tests for matrices, shortest paths, tours and nearest queries.

use proptest::prelude::*;
use shopmap_route::{Location, OptimizerConfig, RouteOptimizer, Shop};

/// Shops scattered over a city-sized box, so some pairs fall beyond a
/// small connection threshold.
fn shops_strategy() -> impl Strategy<Value = Vec<Shop>> {
    prop::collection::vec((-4.2f64..-3.8, 122.3f64..122.7), 1..12).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lng))| Shop::new(i as i64, Location::new(lat, lng)))
            .collect()
    })
}

fn optimizer(shops: Vec<Shop>, max_connection_km: f64) -> RouteOptimizer {
    let config = OptimizerConfig {
        max_connection_km,
        ..OptimizerConfig::default()
    };
    RouteOptimizer::with_shops(shops, config).unwrap()
}

proptest! {
    #[test]
    fn matrices_are_symmetric_with_zero_diagonal(shops in shops_strategy(), max_km in 5.0f64..60.0) {
        let optimizer = optimizer(shops, max_km);
        let direct = optimizer.distance_matrix().unwrap();
        let adjacency = optimizer.adjacency_matrix().unwrap();
        let paths = optimizer.shortest_paths().unwrap();

        prop_assert!(direct.is_symmetric(0.0));
        prop_assert!(adjacency.is_symmetric(0.0));
        for i in 0..direct.size() {
            prop_assert_eq!(direct.get(i, i), 0.0);
            prop_assert_eq!(paths.distance(i, i), 0.0);
        }
    }

    #[test]
    fn direct_distances_obey_triangle_inequality(shops in shops_strategy()) {
        let optimizer = optimizer(shops, 50.0);
        let direct = optimizer.distance_matrix().unwrap();
        let n = direct.size();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    prop_assert!(direct.get(i, j) <= direct.get(i, k) + direct.get(k, j) + 1e-9);
                }
            }
        }
    }

    #[test]
    fn shortest_paths_obey_triangle_inequality(shops in shops_strategy(), max_km in 5.0f64..60.0) {
        let optimizer = optimizer(shops, max_km);
        let paths = optimizer.shortest_paths().unwrap();
        let n = paths.size();
        for i in 0..n {
            for j in 0..n {
                prop_assert!((paths.distance(i, j) - paths.distance(j, i)).abs() < 1e-9
                    || paths.distance(i, j) == paths.distance(j, i));
                for k in 0..n {
                    let via_k = paths.distance(i, k) + paths.distance(k, j);
                    prop_assert!(paths.distance(i, j) <= via_k + 1e-9);
                }
            }
        }
    }

    #[test]
    fn shortest_never_exceeds_existing_edge(shops in shops_strategy(), max_km in 5.0f64..60.0) {
        let optimizer = optimizer(shops, max_km);
        let adjacency = optimizer.adjacency_matrix().unwrap();
        let paths = optimizer.shortest_paths().unwrap();
        let n = adjacency.size();
        for i in 0..n {
            for j in 0..n {
                let edge = adjacency.get(i, j);
                if edge.is_finite() {
                    prop_assert!(paths.distance(i, j) <= edge + 1e-9);
                }
            }
        }
    }

    #[test]
    fn reconstructed_paths_match_distances(shops in shops_strategy(), max_km in 5.0f64..60.0) {
        let optimizer = optimizer(shops, max_km);
        let adjacency = optimizer.adjacency_matrix().unwrap();
        let paths = optimizer.shortest_paths().unwrap();
        let n = adjacency.size();
        for i in 0..n {
            for j in 0..n {
                let path = paths.reconstruct_path(i, j);
                if !paths.is_reachable(i, j) {
                    prop_assert!(path.is_empty());
                    continue;
                }
                prop_assert_eq!(path.first().copied(), Some(i));
                prop_assert_eq!(path.last().copied(), Some(j));
                prop_assert!(path.len() <= n);
                let length: f64 = path.windows(2).map(|w| adjacency.get(w[0], w[1])).sum();
                prop_assert!((length - paths.distance(i, j)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn tour_visits_each_candidate_once(
        shops in shops_strategy(),
        max_km in 5.0f64..60.0,
        picks in prop::collection::vec(0usize..12, 0..16),
        two_opt in any::<bool>(),
    ) {
        let n = shops.len();
        let config = OptimizerConfig {
            max_connection_km: max_km,
            two_opt,
            ..OptimizerConfig::default()
        };
        let optimizer = RouteOptimizer::with_shops(shops, config).unwrap();
        let candidates: Vec<usize> = picks.into_iter().filter(|&i| i < n).collect();

        let tour = optimizer.plan_tour(&Location::new(-4.0, 122.5), &candidates).unwrap();

        let mut expected = candidates.clone();
        expected.sort_unstable();
        expected.dedup();
        let mut stops = tour.stops.clone();
        stops.sort_unstable();
        prop_assert_eq!(stops, expected);
        prop_assert_eq!(tour.legs.len(), tour.stops.len());
        prop_assert!(tour.total_distance_km.is_finite());
        prop_assert!(tour.total_distance_km >= 0.0);
    }

    #[test]
    fn nearest_results_are_sorted_and_bounded(
        shops in shops_strategy(),
        lat in -4.2f64..-3.8,
        lng in 122.3f64..122.7,
        limit in 0usize..15,
        max_km in 0.0f64..40.0,
    ) {
        let optimizer = optimizer(shops, 50.0);
        let nearest = optimizer.find_nearest(&Location::new(lat, lng), limit, max_km).unwrap();

        prop_assert!(nearest.len() <= limit);
        for hit in &nearest {
            prop_assert!(hit.distance_km <= max_km);
        }
        for pair in nearest.windows(2) {
            prop_assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }
}
