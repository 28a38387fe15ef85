use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use uipsat::{
    instances::{implication_chain, pigeonhole},
    Config, Propagation, CDCL,
};

fn cdcl(c: &mut Criterion) {
    let instances = [
        ("pigeonhole-5", pigeonhole(5)),
        ("pigeonhole-6", pigeonhole(6)),
        ("chain-500", implication_chain(500)),
    ];
    let mut group = c.benchmark_group("CDCL");
    for propagation in [Propagation::WatchedLiterals, Propagation::FullScan] {
        let config = Config {
            propagation,
            ..Default::default()
        };
        for (name, clauses) in &instances {
            group.bench_with_input(
                BenchmarkId::new(format!("{propagation:?}"), name),
                clauses,
                |b, clauses| {
                    b.iter(|| CDCL::with_config(clauses.clone(), config).solve());
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, cdcl);
criterion_main!(benches);
