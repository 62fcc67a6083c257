use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pixelsolid_grid::{LabelGrid, Palette};
use pixelsolid_mesh::{build_all, build_all_sequential, build_color_layer};

/// Deterministic pseudo-random labels in `-1..colors`.
fn scatter_grid(w: usize, h: usize, colors: i32, seed: u64) -> LabelGrid {
    let mut s = seed;
    let labels = (0..w * h)
        .map(|_| {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((s >> 33) % (colors as u64 + 1)) as i32 - 1
        })
        .collect();
    LabelGrid::from_labels(w, h, labels).unwrap()
}

fn checkerboard(n: usize) -> LabelGrid {
    let labels = (0..n * n).map(|i| ((i % n + i / n) % 2) as i32).collect();
    LabelGrid::from_labels(n, n, labels).unwrap()
}

fn bench_color_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_layer");
    let board = checkerboard(128);
    group.bench_function("checkerboard_128", |b| {
        b.iter(|| black_box(build_color_layer(black_box(&board), 2.0, 1.0, 1.0, 0)))
    });
    let scatter = scatter_grid(128, 128, 8, 0xC0FFEE);
    group.bench_function("scatter_128_8", |b| {
        b.iter(|| black_box(build_color_layer(black_box(&scatter), 2.0, 1.0, 1.0, 3)))
    });
    group.finish();
}

fn bench_build_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_all");
    let grid = scatter_grid(256, 256, 16, 7);
    let palette = Palette::default();
    group.sample_size(20);
    group.bench_function("parallel_256_16", |b| {
        b.iter(|| black_box(build_all(black_box(&grid), &palette, 1.0, 1.0, 1.0)))
    });
    group.bench_function("sequential_256_16", |b| {
        b.iter(|| black_box(build_all_sequential(black_box(&grid), &palette, 1.0, 1.0, 1.0)))
    });
    group.finish();
}

criterion_group!(benches, bench_color_layer, bench_build_all);
criterion_main!(benches);
