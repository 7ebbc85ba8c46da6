use binary_counter::{find_min, linear};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pprof::criterion::{Output, PProfProfiler};

// odd multiplier, so this permutes 0..size for power of two sizes
fn permutation(size: u64) -> Vec<u64> {
    (0..size).map(|i| (i * 2_654_435_761) % size).collect()
}

fn bench_min(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("min_element");

    let mut size = 16u64;
    while size <= 1024 * 1024 {
        let input = permutation(size);

        group.bench_with_input(
            BenchmarkId::new("linear scan", size),
            &input,
            |b, input| b.iter(|| linear::min_element(input, |x, y| x < y)),
        );

        group.bench_with_input(
            BenchmarkId::new("binary counter", size),
            &input,
            |b, input| b.iter(|| find_min(input, |x, y| x < y)),
        );
        size <<= 4;
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_profiler(
            PProfProfiler::new(100, Output::Flamegraph(None))
        );
    targets = bench_min
}
criterion_main!(benches);
