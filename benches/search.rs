use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

use slider_search::{codec, Board, SearchCursor, SlideMoves};

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..256).map(|_| Board::shuffled(&mut rng)).collect()
}

fn bench_codec(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("codec/encode", |bch| {
        bch.iter(|| {
            let mut acc = 0u64;
            for bd in &boards {
                acc ^= codec::encode(bd);
            }
            black_box(acc)
        })
    });
    let ids: Vec<u64> = boards.iter().map(codec::encode).collect();
    c.bench_function("codec/decode", |bch| {
        bch.iter(|| {
            for &id in &ids {
                black_box(codec::decode(id).ok());
            }
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let root = Board::new([3, 4, 5, 6, 0, 1, 2, 7, 8, 13, 10, 15, 12, 9, 14, 11]).unwrap();
    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    group.bench_function("single_step/depth8", |bch| {
        let cursor = SearchCursor::new(root);
        bch.iter(|| black_box(cursor.search(8, 10).ok()))
    });
    group.bench_function("slides/depth2", |bch| {
        let cursor = SearchCursor::new(root).with_generator(SlideMoves);
        bch.iter(|| black_box(cursor.search(2, 10).ok()))
    });
    group.finish();
}

criterion_group!(benches, bench_codec, bench_search);
criterion_main!(benches);
