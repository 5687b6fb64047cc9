use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gridsweep_core::*;

fn flood_fill(c: &mut Criterion) {
    // a single mine in the corner leaves one huge zero region
    let layout = MineLayout::from_mine_coords((200, 200), &[(199, 199)]).unwrap();

    c.bench_function("flood_fill_200x200", |b| {
        b.iter(|| {
            let mut engine = PlayEngine::new(layout.clone());
            black_box(engine.reveal(black_box((0, 0))).unwrap())
        })
    });
}

fn generate(c: &mut Criterion) {
    let config = GameConfig::expert();

    c.bench_function("generate_expert", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(RandomMinefieldGenerator::new(seed).generate(config).unwrap())
        })
    });
}

fn path_search(c: &mut Criterion) {
    let finder = PathFinder::new((200, 200));
    let orthogonal = finder.with_connectivity(Connectivity::Orthogonal);

    c.bench_function("path_moore_200x200", |b| {
        b.iter(|| black_box(finder.find_path(black_box((0, 0)), black_box((199, 150)))))
    });
    c.bench_function("path_orthogonal_200x200", |b| {
        b.iter(|| black_box(orthogonal.find_path(black_box((0, 0)), black_box((199, 150)))))
    });
}

fn minimax_search(c: &mut Criterion) {
    let layout = MineLayout::from_mine_coords((3, 4), &[(0, 0), (2, 3)]).unwrap();
    let engine = PlayEngine::new(layout);

    c.bench_function("minimax_3x4_depth3", |b| {
        b.iter(|| black_box(minimax(black_box(&engine), 3, true)))
    });
}

criterion_group!(benches, flood_fill, generate, path_search, minimax_search);
criterion_main!(benches);
