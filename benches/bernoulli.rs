use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use lanewise::rng::{par_bernoulli, Method, Stream};

fn bench_bernoulli(c: &mut Criterion) {
    let mut group = c.benchmark_group("bernoulli");

    for &n in &[1 << 12, 1 << 16, 1 << 20] {
        let mut out = vec![0i32; n];
        group.throughput(Throughput::Elements(n as u64));

        for method in [Method::Mcg, Method::Xoshiro] {
            group.bench_with_input(
                BenchmarkId::new(format!("serial_{method:?}"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        let mut stream = Stream::new(method, black_box(42));
                        stream.bernoulli(&mut out, 0.5).unwrap()
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{method:?}"), n),
                &n,
                |b, _| b.iter(|| par_bernoulli(method, black_box(42), 0.5, &mut out).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_bernoulli);
criterion_main!(benches);
