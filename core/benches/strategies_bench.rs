use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use loopbench_core::perf::Strategy;
use loopbench_core::sequence::Sequence;
use std::hint::black_box;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum_strategies");
    for len in [10_000i64, 1_000_000] {
        let seq = Sequence::build(len).expect("benchmark length is positive");
        let expected = seq.expected_sum();
        for strategy in Strategy::ALL {
            assert_eq!(strategy.sum(seq.as_slice()), expected, "strategy {}", strategy);
            group.bench_with_input(BenchmarkId::new(strategy.key(), len), &seq, |b, seq| {
                b.iter(|| black_box(strategy.sum(seq.as_slice())));
            });
        }
    }
    group.finish();
}

criterion_group!(strategies, bench_strategies);
criterion_main!(strategies);
