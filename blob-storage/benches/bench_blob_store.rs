use blob_store::object::{composite_name, split_composite};
use blob_store::IdGenerator;
use criterion::{black_box, criterion_group, criterion_main, Criterion};


fn id_generation_benchmark(c: &mut Criterion) {
    let generator = IdGenerator::default();
    c.bench_function("generate id", |b| b.iter(|| black_box(generator.generate())));
}

fn composite_name_benchmark(c: &mut Criterion) {
    let names: Vec<String> = (0..1000)
        .map(|i| composite_name(&format!("{:012x}", i), &format!("file_{i}.bin")))
        .collect();
    c.bench_function("split 1000 storage names", |b| b.iter(|| {
        for name in &names {
            black_box(split_composite(name));
        }
    }));
}

criterion_group!(benches, id_generation_benchmark, composite_name_benchmark);
criterion_main!(benches);
