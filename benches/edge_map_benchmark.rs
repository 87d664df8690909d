use criterion::{black_box, criterion_group, criterion_main, Criterion};
use edgemill::{edge_map_partitioned, CscGraph, PipelineConfig, SparseGraph};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed-pattern store: every vertex has `degree` in-edges.
fn patterned_graph(nodes: u32, degree: u32) -> CscGraph {
    let incoming: Vec<Vec<u32>> = (0..nodes)
        .map(|v| (0..degree).map(|k| (v * 7 + k * 13) % nodes).collect())
        .collect();
    CscGraph::from_in_adjacency(&incoming).unwrap()
}

fn bench_edge_map(c: &mut Criterion) {
    let graph = patterned_graph(10_000, 16);
    let sum = AtomicU64::new(0);
    let relax = |src: u32, dst: u32| {
        sum.fetch_add(u64::from(src ^ dst), Ordering::Relaxed);
    };

    c.bench_function("edge_map_sequential", |b| {
        b.iter(|| {
            graph.edge_map(&relax);
            black_box(sum.load(Ordering::Relaxed))
        });
    });

    c.bench_function("edge_map_partitioned_4t", |b| {
        b.iter(|| {
            edge_map_partitioned(&graph, &relax, 4).unwrap();
            black_box(sum.load(Ordering::Relaxed))
        });
    });

    c.bench_function("edge_map_pipelined_2p2c", |b| {
        b.iter(|| {
            graph
                .edge_map_pipelined(&relax, &PipelineConfig::new(2, 2))
                .unwrap();
            black_box(sum.load(Ordering::Relaxed))
        });
    });
}

fn bench_out_degree(c: &mut Criterion) {
    let graph = patterned_graph(10_000, 16);
    c.bench_function("out_degree", |b| {
        b.iter(|| black_box(graph.out_degree()));
    });
}

criterion_group!(benches, bench_edge_map, bench_out_degree);
criterion_main!(benches);
