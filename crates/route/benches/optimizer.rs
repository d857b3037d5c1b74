//! Benchmarks for network construction and route queries.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shopmap_route::{
    DistanceMatrixBuilder, Location, OptimizerConfig, RouteOptimizer, Shop, ShortestPaths,
};

fn create_test_shops(count: usize) -> Vec<Shop> {
    (0..count)
        .map(|i| {
            // Scatter shops over a ~40 km box around Kendari
            let lat = -4.1 + (i as f64 * 0.0137) % 0.35;
            let lng = 122.35 + (i as f64 * 0.0071) % 0.35;
            Shop::new(i as i64, Location::new(lat, lng))
        })
        .collect()
}

fn bench_initialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("initialize");

    for size in [10, 50, 100, 200].iter() {
        let shops = create_test_shops(*size);

        group.bench_with_input(BenchmarkId::new("matrices", size), size, |b, _| {
            b.iter(|| DistanceMatrixBuilder::new(10.0).build(black_box(&shops)))
        });

        let matrices = DistanceMatrixBuilder::new(10.0).build(&shops).unwrap();
        group.bench_with_input(BenchmarkId::new("floyd_warshall", size), size, |b, _| {
            b.iter(|| ShortestPaths::solve(black_box(&matrices.adjacency)))
        });
    }

    group.finish();
}

fn bench_tour(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_tour");
    let start = Location::new(-4.0, 122.5);
    let shops = create_test_shops(100);
    let candidates: Vec<usize> = (0..100).step_by(4).collect();

    for two_opt in [false, true] {
        let config = OptimizerConfig {
            max_connection_km: 10.0,
            two_opt,
            ..OptimizerConfig::default()
        };
        let optimizer = RouteOptimizer::with_shops(shops.clone(), config).unwrap();
        let label = if two_opt { "two_opt" } else { "nearest_neighbour" };

        group.bench_function(label, |b| {
            b.iter(|| optimizer.plan_tour(black_box(&start), black_box(&candidates)))
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let optimizer =
        RouteOptimizer::with_shops(create_test_shops(300), OptimizerConfig::default()).unwrap();
    let origin = Location::new(-4.0, 122.5);
    let route = [
        Location::new(-4.1, 122.35),
        Location::new(-3.95, 122.5),
        Location::new(-3.8, 122.7),
    ];

    c.bench_function("find_nearest_300", |b| {
        b.iter(|| optimizer.find_nearest(black_box(&origin), 10, 5.0))
    });

    c.bench_function("find_along_route_300", |b| {
        b.iter(|| optimizer.find_along_route(black_box(&route), 1.0))
    });
}

criterion_group!(benches, bench_initialize, bench_tour, bench_queries);
criterion_main!(benches);
