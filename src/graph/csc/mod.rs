//! A compact CSC (compressed sparse column) adjacency store.
//!
//! CSC stores edges in column-major order: for each destination vertex the
//! ids of its incoming edge *sources* are contiguous. This makes it the
//! natural layout for pull-style aggregations, where every vertex folds a
//! value over its in-edges.
//!
//! Memory layout:
//! - `index`: `Vec<usize>` of length `V + 1` (column offsets)
//! - `sources`: `Vec<u32>` of length `E` (source vertex id per edge)

use crate::error::{GraphError, Result};
use crate::graph::{Relax, SparseGraph};
use std::ops::Range;

/// An immutable compressed-sparse-column graph.
///
/// Built once from validated input, then read-only for the remainder of the
/// process; there is no interior mutability, so a `&CscGraph` is freely
/// shared across threads without synchronization.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_parts` | \(O(V + E)\) | Validates offsets and source ids |
/// | `in_neighbors` | \(O(1)\) | Returns iterator over incoming sources |
/// | `in_degree` | \(O(1)\) | Offset difference |
/// | `out_degree` | \(O(E)\) | One pass over `sources` |
/// | `edge_map` | \(O(V + E)\) | Sequential; see [`edge_map_pipelined`](Self::edge_map_pipelined) |
#[derive(Debug)]
pub struct CscGraph {
    index: Vec<usize>,
    sources: Vec<u32>,
}

impl CscGraph {
    /// Builds a graph directly from CSC parts.
    ///
    /// `index` must hold `V + 1` monotone offsets starting at 0 and ending
    /// at `sources.len()`; every entry of `sources` must be a vertex id in
    /// `[0, V)`. Any violation is a [`GraphError::Format`] and no graph is
    /// produced.
    pub fn from_parts(index: Vec<usize>, sources: Vec<u32>) -> Result<Self> {
        let Some((&edge_total, _)) = index.split_last() else {
            return Err(GraphError::Format(
                "index is empty: expected num_vertices + 1 offsets".into(),
            ));
        };
        let num_vertices = index.len() - 1;
        if num_vertices > u32::MAX as usize {
            return Err(GraphError::Format(format!(
                "vertex count {num_vertices} exceeds the u32 id range"
            )));
        }
        if index[0] != 0 {
            return Err(GraphError::Format(format!(
                "index[0] is {}, expected 0",
                index[0]
            )));
        }
        for (v, pair) in index.windows(2).enumerate() {
            if pair[0] > pair[1] {
                return Err(GraphError::Format(format!(
                    "index is not monotone at vertex {v}: {} > {}",
                    pair[0], pair[1]
                )));
            }
        }
        if edge_total != sources.len() {
            return Err(GraphError::Format(format!(
                "index ends at {edge_total} but {} edge sources are present",
                sources.len()
            )));
        }
        for (e, &source) in sources.iter().enumerate() {
            if source as usize >= num_vertices {
                return Err(GraphError::Format(format!(
                    "edge {e} has source {source}, out of bounds for {num_vertices} vertices"
                )));
            }
        }
        Ok(Self { index, sources })
    }

    /// Builds a graph from per-destination incoming source lists.
    ///
    /// `incoming[v]` is the ordered sequence of source ids of the edges
    /// feeding into vertex `v`. Fails with [`GraphError::Format`] if any id
    /// is out of bounds.
    pub fn from_in_adjacency(incoming: &[Vec<u32>]) -> Result<Self> {
        let total: usize = incoming.iter().map(Vec::len).sum();
        let mut index = Vec::with_capacity(incoming.len() + 1);
        let mut sources = Vec::with_capacity(total);
        index.push(0);
        for list in incoming {
            sources.extend_from_slice(list);
            index.push(sources.len());
        }
        Self::from_parts(index, sources)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.index.len() - 1
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.sources.len()
    }

    /// Half-open range of edge indices whose destination is `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn edge_range(&self, vertex: u32) -> Range<usize> {
        let v = vertex as usize;
        assert!(v < self.num_vertices(), "vertex {vertex} out of bounds");
        self.index[v]..self.index[v + 1]
    }

    /// Source vertex id of the `edge`-th stored edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is out of bounds.
    #[inline]
    pub fn source_at(&self, edge: usize) -> u32 {
        assert!(edge < self.num_edges(), "edge {edge} out of bounds");
        self.sources[edge]
    }

    /// Returns the incoming neighbors of a vertex (sources of its in-edges).
    pub fn in_neighbors(&self, vertex: u32) -> impl Iterator<Item = u32> + '_ {
        self.edge_range(vertex).map(move |e| self.sources[e])
    }

    /// Returns the in-degree of a vertex.
    pub fn in_degree(&self, vertex: u32) -> usize {
        self.edge_range(vertex).len()
    }
}

impl SparseGraph for CscGraph {
    fn num_vertices(&self) -> usize {
        self.index.len() - 1
    }

    fn num_edges(&self) -> usize {
        self.sources.len()
    }

    fn ranged_edge_map<R: Relax>(&self, relax: &R, from: u32, to: u32) {
        assert!(from <= to, "invalid vertex range {from}..{to}");
        assert!(
            to as usize <= self.num_vertices(),
            "vertex range end {to} out of bounds"
        );
        for v in from..to {
            for e in self.index[v as usize]..self.index[v as usize + 1] {
                relax.relax(self.sources[e], v);
            }
        }
    }

    fn out_degree(&self) -> Vec<u32> {
        let mut degrees = vec![0u32; self.num_vertices()];
        for &source in &self.sources {
            degrees[source as usize] += 1;
        }
        degrees
    }
}
