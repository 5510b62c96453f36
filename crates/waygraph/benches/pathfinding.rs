// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Waygraph Contributors

//! Pathfinding benchmarks.
//!
//! Run with:
//! cargo bench --bench pathfinding

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use waygraph::grid::{self, GridPoint};
use waygraph::UndirectedGraph;

fn open_grid(side: usize) -> UndirectedGraph<GridPoint> {
    let row = ".".repeat(side);
    let rows: Vec<&str> = (0..side).map(|_| row.as_str()).collect();
    grid::walkable_grid(&rows, false)
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    for side in [16usize, 64, 128] {
        let mut g = open_grid(side);
        let start = GridPoint::new(0, 0);
        let goal = GridPoint::new(side as i32 - 1, side as i32 - 1);

        group.bench_with_input(BenchmarkId::new("dijkstra", side), &side, |b, _| {
            b.iter(|| g.find_minimum_distance(&start, &goal).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("astar_manhattan", side), &side, |b, _| {
            b.iter(|| {
                g.find_shortest_path(&start, &goal, Some(&grid::manhattan))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut g = open_grid(64);
    let start = GridPoint::new(32, 32);
    let mut group = c.benchmark_group("traversal");
    group.bench_function("bfs_full", |b| {
        b.iter(|| g.breadth_first_search(&start).unwrap())
    });
    group.bench_function("dfs_full", |b| {
        b.iter(|| g.depth_first_search(&start).unwrap())
    });
    group.finish();
}

fn bench_spanning_tree(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut g = UndirectedGraph::new();
    let n: u32 = 1000;
    g.add_vertices(0..n);
    // Random connected-ish graph, average degree ~8.
    for _ in 0..(n * 4) {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a != b {
            g.add_edge(&a, &b, rng.gen_range(1.0..100.0)).unwrap();
        }
    }
    c.bench_function("kruskal_mst_1000", |b| {
        b.iter(|| g.minimum_weight_spanning_tree())
    });
}

criterion_group!(
    benches,
    bench_shortest_path,
    bench_traversal,
    bench_spanning_tree
);
criterion_main!(benches);
