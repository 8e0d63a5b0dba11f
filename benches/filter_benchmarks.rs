//! Benchmarks for smoothing filter performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_teleop::{
    filters::{moving_average::MovingAverageFilter, CoordinateFilter, NoFilter},
    transform::HandCoords,
};
use nalgebra::SMatrix;

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    // Test data - simulating jittery hand coordinates
    let test_data: Vec<HandCoords> = (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            HandCoords::from_matrix(SMatrix::from_fn(|row, col| {
                let base = if col == 0 { t.sin() } else { t.cos() };
                base * (row as f64 + 1.0) + 0.05 * rand::random::<f64>()
            }))
        })
        .collect();

    let filter_configs = vec![
        ("no_filter", Box::new(NoFilter) as Box<dyn CoordinateFilter>),
        ("moving_average_5", Box::new(MovingAverageFilter::new(5))),
        ("moving_average_10", Box::new(MovingAverageFilter::new(10))),
        ("moving_average_30", Box::new(MovingAverageFilter::new(30))),
    ];

    for (name, mut filter) in filter_configs {
        group.bench_with_input(BenchmarkId::new("single_update", name), &test_data[0], |b, coords| {
            b.iter(|| black_box(filter.apply(black_box(coords))));
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", name), &test_data, |b, data| {
            b.iter(|| {
                for coords in data {
                    black_box(filter.apply(black_box(coords)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_filters);
criterion_main!(benches);
