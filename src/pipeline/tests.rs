//! Tests for the pipelined engine.

use super::*;
use crate::graph::SparseGraph;
use std::collections::HashMap;
use std::sync::Mutex;

fn reference_graph() -> CscGraph {
    // V=3, E=4: edges (2->0), (0->1), (1->1), (2->2).
    CscGraph::from_parts(vec![0, 1, 3, 4], vec![2, 0, 1, 2]).unwrap()
}

/// A deterministic skewed-degree graph: vertex `v` has `v % 5` in-edges.
fn patterned_graph(num_vertices: u32) -> CscGraph {
    let incoming: Vec<Vec<u32>> = (0..num_vertices)
        .map(|v| (0..v % 5).map(|k| (v * 7 + k) % num_vertices).collect())
        .collect();
    CscGraph::from_in_adjacency(&incoming).unwrap()
}

fn sequential_multiset(graph: &CscGraph) -> HashMap<(u32, u32), usize> {
    let seen = Mutex::new(HashMap::new());
    graph.edge_map(&|src: u32, dst: u32| {
        *seen.lock().unwrap().entry((src, dst)).or_insert(0) += 1;
    });
    seen.into_inner().unwrap()
}

fn pipelined_multiset(graph: &CscGraph, config: &PipelineConfig) -> HashMap<(u32, u32), usize> {
    let seen = Mutex::new(HashMap::new());
    graph
        .edge_map_pipelined(
            &|src: u32, dst: u32| {
                *seen.lock().unwrap().entry((src, dst)).or_insert(0) += 1;
            },
            config,
        )
        .unwrap();
    seen.into_inner().unwrap()
}

#[test]
fn scenario_single_producer_single_consumer() {
    let graph = reference_graph();
    let seen = pipelined_multiset(&graph, &PipelineConfig::new(1, 1));

    let mut expected = HashMap::new();
    for edge in [(2, 0), (0, 1), (1, 1), (2, 2)] {
        expected.insert(edge, 1);
    }
    assert_eq!(seen, expected);
}

#[test]
fn completeness_matches_sequential_across_pool_sizes() {
    let graph = patterned_graph(60);
    let expected = sequential_multiset(&graph);
    assert_eq!(expected.values().sum::<usize>(), graph.num_edges());

    for (producers, consumers) in [(1, 1), (1, 4), (4, 1), (3, 2), (8, 8)] {
        // A tiny queue forces producers to suspend on a full channel.
        let config = PipelineConfig {
            producers,
            consumers,
            queue_capacity: 2,
        };
        let seen = pipelined_multiset(&graph, &config);
        assert_eq!(seen, expected, "{producers}p/{consumers}c diverged");
    }
}

#[test]
fn empty_graph_terminates() {
    let graph = CscGraph::from_parts(vec![0], vec![]).unwrap();
    let seen = pipelined_multiset(&graph, &PipelineConfig::new(2, 2));
    assert!(seen.is_empty());
}

#[test]
fn edgeless_graph_terminates() {
    let graph = CscGraph::from_in_adjacency(&[vec![], vec![], vec![]]).unwrap();
    let seen = pipelined_multiset(&graph, &PipelineConfig::new(2, 2));
    assert!(seen.is_empty());
}

#[test]
fn excess_producers_receive_empty_ranges() {
    let graph = reference_graph();
    let seen = pipelined_multiset(&graph, &PipelineConfig::new(16, 2));
    assert_eq!(seen.values().sum::<usize>(), 4);
}

#[test]
fn repeated_runs_deliver_identical_multisets() {
    let graph = patterned_graph(40);
    let config = PipelineConfig::new(2, 2);
    let first = pipelined_multiset(&graph, &config);
    let second = pipelined_multiset(&graph, &config);
    assert_eq!(first, second);
}

#[test]
fn default_config_gives_each_pool_a_worker() {
    let config = PipelineConfig::default();
    assert!(config.producers >= 1);
    assert!(config.consumers >= 1);
    assert!(config.queue_capacity >= 1);
}

#[test]
fn final_partial_block_is_marked_last() {
    // 300 edges into one vertex: two full blocks, one partial tail block.
    let sources: Vec<u32> = (0..300).map(|k| k % 7).collect();
    let graph = CscGraph::from_parts(vec![0, 300, 300, 300, 300, 300, 300, 300], sources).unwrap();

    let (sender, receiver) = queue::bounded::<EdgeBlock>(8);
    #[allow(clippy::cast_possible_truncation)]
    let whole_range = 0..graph.num_vertices() as u32;
    assert!(produce_range(&graph, whole_range, &sender));
    drop(sender);

    let mut blocks = Vec::new();
    while let Ok(block) = receiver.recv() {
        blocks.push(block);
    }
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks.iter().map(|b| b.edges().count()).sum::<usize>(), 300);
    assert!(!blocks[0].is_last);
    assert!(!blocks[1].is_last);
    assert!(blocks[2].is_last);
}

#[test]
fn interior_range_block_is_not_marked_last() {
    let graph = patterned_graph(20);
    let (sender, receiver) = queue::bounded::<EdgeBlock>(8);
    assert!(produce_range(&graph, 0..10, &sender));
    drop(sender);

    while let Ok(block) = receiver.recv() {
        assert!(!block.is_last, "interior range must not mark end of stream");
    }
}

#[test]
fn producer_stops_early_when_consumers_vanish() {
    let graph = patterned_graph(60);
    let (sender, receiver) = queue::bounded::<EdgeBlock>(1);
    drop(receiver);
    #[allow(clippy::cast_possible_truncation)]
    let whole_range = 0..graph.num_vertices() as u32;
    assert!(!produce_range(&graph, whole_range, &sender));
}
