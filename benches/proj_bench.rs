use criterion::{black_box, criterion_group, criterion_main, Criterion};

use projkit::cache::{CacheConfig, CachePolicy, ObjectCache};
use projkit::proj::parameters::{ParameterBlock, SEMI_MAJOR, SEMI_MINOR};
use projkit::proj::transform::{MapTransform, ProjectionFamily};

fn wgs84_block() -> ParameterBlock {
    ParameterBlock::new()
        .set(SEMI_MAJOR, 6_378_137.0)
        .set(SEMI_MINOR, 6_356_752.314_245_179)
}

fn make_points(n: usize) -> Vec<f64> {
    let mut pts = Vec::with_capacity(2 * n);
    for i in 0..n {
        let t = i as f64 / n as f64;
        pts.push(-170.0 + 340.0 * t);
        pts.push(-80.0 + 160.0 * t);
    }
    pts
}

fn bench_forward_single(c: &mut Criterion) {
    let mercator = MapTransform::new(ProjectionFamily::Mercator, &wgs84_block()).unwrap();
    let nzmg = MapTransform::new_zealand_map_grid().unwrap();

    c.bench_function("mercator_forward", |b| {
        b.iter(|| mercator.forward(black_box(12.5), black_box(48.1)).unwrap())
    });
    c.bench_function("nzmg_forward", |b| {
        b.iter(|| nzmg.forward(black_box(174.78), black_box(-41.29)).unwrap())
    });
    c.bench_function("nzmg_inverse", |b| {
        let (x, y) = nzmg.forward(174.78, -41.29).unwrap();
        b.iter(|| nzmg.inverse(black_box(x), black_box(y)).unwrap())
    });
}

fn bench_forward_batch(c: &mut Criterion) {
    let mercator = MapTransform::new(ProjectionFamily::Mercator, &wgs84_block()).unwrap();
    let template = make_points(4096);

    c.bench_function("mercator_forward_batch_4096", |b| {
        b.iter_batched(
            || template.clone(),
            |mut pts| {
                mercator.forward_slice(&mut pts, 0, 0, 4096).unwrap();
                pts
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_cache_hit(c: &mut Criterion) {
    let cache: ObjectCache<u64> = ObjectCache::new(CacheConfig {
        policy: CachePolicy::Weak,
        capacity: 64,
    });
    cache
        .get_or_create("4326", || Ok::<_, std::convert::Infallible>(1u64))
        .unwrap();

    c.bench_function("cache_hit", |b| {
        b.iter(|| {
            cache
                .get_or_create(black_box("4326"), || {
                    Ok::<_, std::convert::Infallible>(2u64)
                })
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_forward_single,
    bench_forward_batch,
    bench_cache_hit
);
criterion_main!(benches);
