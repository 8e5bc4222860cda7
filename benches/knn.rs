use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kdknn::{
    knn_batch, BuildConfig, CandidateList, ClosestCorner, ClosestCornerStackFree,
    FixedCandidateList, HeapCandidateList, KdTree, Point, QueryConfig, StackBased, StackFree,
    Traversal,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const NUM_QUERIES: usize = 10_000;
const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

fn random_points(n: usize, seed: u64) -> Vec<Point<3>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            ]
        })
        .collect()
}

fn run_queries<S: Traversal, C: CandidateList>(
    tree: &KdTree<Point<3>, 3>,
    queries: &[Point<3>],
) -> f32 {
    let mut total = 0.0;
    for query in queries {
        let mut list = C::new(f32::INFINITY);
        total += S::knn(&mut list, black_box(query), tree);
    }
    total
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    for &size in &SIZES {
        let points = random_points(size, 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &points, |b, points| {
            b.iter(|| KdTree::<Point<3>, 3>::build(points.clone(), &BuildConfig::default()))
        });
    }

    group.finish();
}

fn benchmark_traversals(c: &mut Criterion) {
    let queries = random_points(NUM_QUERIES, 2);

    for &size in &SIZES {
        let points = random_points(size, 1);
        let Ok(tree) = KdTree::<Point<3>, 3>::build(points, &BuildConfig::default()) else {
            continue;
        };

        let mut group = c.benchmark_group(format!("knn8_{}k", size / 1000));
        group.sample_size(20);

        group.bench_function("stack-based", |b| {
            b.iter(|| run_queries::<StackBased, FixedCandidateList<8>>(&tree, &queries))
        });
        group.bench_function("stack-free", |b| {
            b.iter(|| run_queries::<StackFree, FixedCandidateList<8>>(&tree, &queries))
        });
        group.bench_function("closest-corner", |b| {
            b.iter(|| run_queries::<ClosestCorner, FixedCandidateList<8>>(&tree, &queries))
        });
        group.bench_function("closest-corner-stack-free", |b| {
            b.iter(|| run_queries::<ClosestCornerStackFree, FixedCandidateList<8>>(&tree, &queries))
        });
        group.bench_function("closest-corner/heap", |b| {
            b.iter(|| run_queries::<ClosestCorner, HeapCandidateList<8>>(&tree, &queries))
        });

        group.finish();
    }
}

fn benchmark_parallelism(c: &mut Criterion) {
    let points = random_points(100_000, 1);
    let Ok(tree) = KdTree::<Point<3>, 3>::build(points, &BuildConfig::default()) else {
        return;
    };
    let queries = random_points(100_000, 3);

    let mut group = c.benchmark_group("batch_100k");
    group.sample_size(10);

    let max_cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(8);
    let mut cores_list = Vec::new();
    let mut cores = 1;
    while cores <= max_cores {
        cores_list.push(cores);
        cores *= 2;
    }
    if cores_list.last().is_some_and(|&last| last < max_cores) {
        cores_list.push(max_cores);
    }

    for &num_threads in &cores_list {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap();

        let id = BenchmarkId::new("closest-corner", num_threads);
        group.bench_with_input(id, &num_threads, |b, &_n| {
            b.iter(|| {
                pool.install(|| {
                    knn_batch::<ClosestCorner, FixedCandidateList<8>, _, 3>(
                        &tree,
                        &queries,
                        &QueryConfig::default(),
                    )
                })
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_traversals, benchmark_parallelism);
criterion_main!(benches);
