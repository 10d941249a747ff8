use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rstar::RTree;
use zindex::{LinearIndex, ZIndex};

const D: usize = 6;
const SEED: u64 = 0;
const N: usize = 10000;
const NUM_QUERIES: usize = 100;
const RADIUS: f64 = 1000.0;

fn build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("build");
    group.sample_size(10);

    let pts = dataset(N);
    group.bench_function("zindex", |b| b.iter(|| build_zindex(&pts)));
    group.bench_function("linear", |b| b.iter(|| build_linear(&pts)));
    group.bench_function("rstar", |b| b.iter(|| build_rstar(&pts)));
    group.finish();
}

fn query_radius(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("query_radius");
    group.sample_size(10);

    let pts = dataset(N);
    let queries = dataset(NUM_QUERIES);

    let zindex = build_zindex(&pts);
    group.bench_function("zindex", |b| {
        b.iter(|| {
            let mut found = 0;
            for query in &queries {
                zindex.query_radius(query, RADIUS, |_| found += 1).unwrap();
            }
            found
        });
    });

    let linear = build_linear(&pts);
    group.bench_function("linear", |b| {
        b.iter(|| {
            let mut found = 0;
            for query in &queries {
                linear.query_radius(query, RADIUS, |_| found += 1).unwrap();
            }
            found
        });
    });

    let rstar = build_rstar(&pts);
    group.bench_function("rstar", |b| {
        b.iter(|| {
            let mut found = 0;
            for query in &queries {
                found += rstar
                    .locate_within_distance(to_float(query), RADIUS * RADIUS)
                    .count();
            }
            found
        });
    });
    group.finish();
}

criterion_group!(benches, build, query_radius);
criterion_main!(benches);

fn build_zindex(pts: &[[u32; D]]) -> ZIndex<D> {
    let mut index = ZIndex::default();
    for p in pts {
        index.insert(*p).unwrap();
    }
    index
}

fn build_linear(pts: &[[u32; D]]) -> LinearIndex<D> {
    let mut index = LinearIndex::new();
    for p in pts {
        index.insert(*p);
    }
    index
}

fn build_rstar(pts: &[[u32; D]]) -> RTree<[f64; D]> {
    RTree::bulk_load(pts.iter().map(to_float).collect())
}

fn to_float(p: &[u32; D]) -> [f64; D] {
    p.map(f64::from)
}

// Clustered like tracking labels: positions near the middle of a 16-bit
// range, the last two coordinates unused.
fn dataset(n: usize) -> Vec<[u32; D]> {
    let mut rng = StdRng::seed_from_u64(SEED + n as u64);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(20_000..60_000),
                rng.gen_range(45_000..55_000),
                rng.gen_range(40_000..60_000),
                rng.gen_range(0..6_280),
                0,
                0,
            ]
        })
        .collect()
}
