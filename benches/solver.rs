//! Benchmarks for the jigsaw solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use jigsaw::assembly::assemble;
use jigsaw::bitmap::Bitmap;
use jigsaw::monster::{detect, Pattern};
use jigsaw::synthetic::{cut, noise_image};
use jigsaw::{NeighbourhoodIndex, Puzzle, SolverConfig, TileId, TransformationGroup};

/// A scrambled `grid x grid` puzzle of side-12 tiles.
fn synthetic_puzzle(grid: usize, group: &TransformationGroup) -> Puzzle {
    let ids: Vec<TileId> = (0..grid * grid).map(|k| 1009 + 13 * k as TileId).collect();
    let image = noise_image(grid * 10, 2020);
    let cut = cut(&image, grid, 12, &ids, true, group)
        .expect("valid generator parameters");
    Puzzle::new(cut.tiles).expect("tiles form a puzzle")
}

/// Benchmark building the neighbourhood index for a 12x12 puzzle.
fn bench_index(c: &mut Criterion) {
    let group = TransformationGroup::new();
    let puzzle = synthetic_puzzle(12, &group);

    c.bench_function("neighbourhood_index_12x12", |b| {
        b.iter(|| NeighbourhoodIndex::build(black_box(&puzzle), &group))
    });
}

/// Benchmark the full solve, index included.
fn bench_solve(c: &mut Criterion) {
    let group = TransformationGroup::new();
    let puzzle = synthetic_puzzle(12, &group);
    let config = SolverConfig::default();

    let mut bench_group = c.benchmark_group("solve");
    bench_group.sample_size(20);
    bench_group.bench_function("12x12", |b| {
        b.iter(|| black_box(&puzzle).solve(&group, &config))
    });
    bench_group.finish();
}

/// Benchmark monster detection on an assembled 120x120 image.
fn bench_detect(c: &mut Criterion) {
    let group = TransformationGroup::new();
    let puzzle = synthetic_puzzle(12, &group);
    let placement = puzzle
        .solve(&group, &SolverConfig::default())
        .0
        .expect("synthetic puzzle is solvable");
    let image: Bitmap = assemble(&puzzle, &placement, &group);
    let monster = Pattern::sea_monster();

    c.bench_function("detect_120x120", |b| {
        b.iter(|| detect(black_box(&image), &monster, &group))
    });
}

criterion_group!(benches, bench_index, bench_solve, bench_detect);
criterion_main!(benches);
