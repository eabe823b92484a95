//! Benchmark for chunk and world generation.
//!
//! Run with: cargo bench --package infinitecity_procedural --bench chunk_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use infinitecity_procedural::{
    BuildingCatalog, ChunkContentGenerator, ChunkRng, CityConfig, CityWorld, LotSubdivider, Rect,
};

fn benchmark_single_chunk(c: &mut Criterion) {
    let catalog = BuildingCatalog::default();
    let mut group = c.benchmark_group("single_chunk");

    group.bench_function("park_64x64x32", |b| {
        b.iter(|| {
            let mut gen = ChunkContentGenerator::new([64, 64, 32]).unwrap();
            gen.flatten_world();
            black_box(gen.into_volume())
        });
    });

    group.bench_function("city_block_64x64x32", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut gen = ChunkContentGenerator::new([64, 64, 32]).unwrap();
            let mut rng = ChunkRng::from_seed(seed);
            gen.flatten_world();
            black_box(gen.construct_buildings(8, &catalog, &mut rng).unwrap());
            black_box(gen.into_volume())
        });
    });

    group.bench_function("skyscraper_16x16x64", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut gen = ChunkContentGenerator::new([16, 16, 64]).unwrap();
            let mut rng = ChunkRng::from_seed(seed);
            gen.flatten_world();
            black_box(gen.construct_skyscraper(&mut rng).unwrap());
            black_box(gen.into_volume())
        });
    });

    group.finish();
}

fn benchmark_subdivision(c: &mut Criterion) {
    let subdivider = LotSubdivider::new(4).unwrap();
    let block = Rect::new(0, 0, 255, 255).unwrap();

    c.bench_function("subdivide_256x256_min4", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(subdivider.divide(block, &mut ChunkRng::from_seed(seed)))
        });
    });
}

fn benchmark_world(c: &mut Criterion) {
    let config = CityConfig {
        seed: 42,
        world_chunks: [16, 16, 1],
        ..CityConfig::default()
    };
    let world = CityWorld::new(config).unwrap();

    let mut group = c.benchmark_group("world_generation");
    group.sample_size(10);
    group.throughput(Throughput::Elements(16 * 16));

    group.bench_function("16x16_chunks_sequential", |b| {
        b.iter(|| black_box(world.generate().unwrap()));
    });
    group.bench_function("16x16_chunks_4_workers", |b| {
        b.iter(|| black_box(world.generate_parallel(4).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_chunk,
    benchmark_subdivision,
    benchmark_world,
);
criterion_main!(benches);
