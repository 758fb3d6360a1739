use criterion::{criterion_group, criterion_main};

mod shell;

criterion_group!(
    benches,
    shell::engine::bench_tokenize,
    shell::engine::bench_validate,
    shell::engine::bench_dispatch
);
criterion_main!(benches);
