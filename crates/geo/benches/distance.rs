//! Benchmarks for distance and geometry primitives.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shopmap_geo::{buffer_polygon, distances_from, haversine_distance, point_in_polygon, Location};

fn create_test_locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| {
            // Spread shops over a ~20 km square around Kendari
            let lat = -4.1 + (i as f64 * 0.013) % 0.2;
            let lng = 122.4 + (i as f64 * 0.007) % 0.2;
            Location::new(lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let kendari = Location::new(-3.9778, 122.5194);
    let makassar = Location::new(-5.1477, 119.4327);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&kendari), black_box(&makassar)))
    });
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let origin = Location::new(-3.9785, 122.5190);

    for size in [10, 100, 1000, 10000].iter() {
        let locations = create_test_locations(*size);

        group.bench_with_input(BenchmarkId::new("distances_from", size), size, |b, _| {
            b.iter(|| distances_from(black_box(&origin), black_box(&locations)))
        });
    }

    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let route = create_test_locations(50);
    let corridor = buffer_polygon(&route, 0.5);
    let probe = Location::new(-4.0, 122.5);

    let mut group = c.benchmark_group("geometry");

    group.bench_function("buffer_polygon_50", |b| {
        b.iter(|| buffer_polygon(black_box(&route), black_box(0.5)))
    });

    group.bench_function("point_in_polygon", |b| {
        b.iter(|| point_in_polygon(black_box(&probe), black_box(corridor.vertices())))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_batch_distances,
    bench_geometry
);
criterion_main!(benches);
