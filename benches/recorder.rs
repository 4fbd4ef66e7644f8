//! Benchmarks for animation recording and playback.

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use algo_viz::{
    animation::{BarSurface, PlaybackScheduler, record},
    compute::SortAlgorithm,
    schema::{DataRng, PlaybackConfig},
};

fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");

    for size in [10, 50, 100, 500] {
        let values = DataRng::new(42).bar_array(size, 10, 700);

        for algorithm in SortAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), size),
                &values,
                |b, values| {
                    b.iter(|| record(algorithm, black_box(values)));
                },
            );
        }
    }

    group.finish();
}

fn bench_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback_virtual");

    for size in [50, 100] {
        let values = DataRng::new(7).bar_array(size, 10, 700);
        let log = record(SortAlgorithm::Quick, &values);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("quick_{}", size)),
            &size,
            |b, _| {
                b.iter(|| {
                    let mut surface = BarSurface::from_values(&values);
                    let mut scheduler = PlaybackScheduler::new(PlaybackConfig::default(), 100);
                    scheduler
                        .start(log.clone(), &surface, Duration::ZERO)
                        .expect("log fits surface");
                    scheduler.run_virtual(black_box(&mut surface), Duration::ZERO)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_record, bench_playback);
criterion_main!(benches);
