//! A coordinate-list (COO) adjacency store.
//!
//! COO keeps one `(source, destination)` pair per edge in two parallel
//! arrays, with no per-vertex grouping. It is the cheapest encoding to build
//! from an arbitrary edge stream and the least structured to traverse: a
//! ranged traversal has to scan the whole edge list and filter.

use crate::error::{GraphError, Result};
use crate::graph::{Relax, SparseGraph};

/// An immutable coordinate-list graph.
///
/// Unlike the compressed encodings, the vertex count cannot be recovered
/// from the arrays and is stored explicitly.
#[derive(Debug)]
pub struct CooGraph {
    num_vertices: usize,
    sources: Vec<u32>,
    destinations: Vec<u32>,
}

impl CooGraph {
    /// Builds a graph from parallel source/destination arrays.
    ///
    /// The arrays must have equal length and every id must lie in
    /// `[0, num_vertices)`; violations are [`GraphError::Format`].
    pub fn from_parts(
        num_vertices: usize,
        sources: Vec<u32>,
        destinations: Vec<u32>,
    ) -> Result<Self> {
        if num_vertices > u32::MAX as usize {
            return Err(GraphError::Format(format!(
                "vertex count {num_vertices} exceeds the u32 id range"
            )));
        }
        if sources.len() != destinations.len() {
            return Err(GraphError::Format(format!(
                "{} sources but {} destinations",
                sources.len(),
                destinations.len()
            )));
        }
        for (e, (&source, &destination)) in sources.iter().zip(&destinations).enumerate() {
            if source as usize >= num_vertices || destination as usize >= num_vertices {
                return Err(GraphError::Format(format!(
                    "edge {e} ({source} -> {destination}) is out of bounds for {num_vertices} vertices"
                )));
            }
        }
        Ok(Self {
            num_vertices,
            sources,
            destinations,
        })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.sources.len()
    }
}

impl SparseGraph for CooGraph {
    fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    fn num_edges(&self) -> usize {
        self.sources.len()
    }

    /// The range is over *destination* vertices, selected by a full scan.
    fn ranged_edge_map<R: Relax>(&self, relax: &R, from: u32, to: u32) {
        assert!(from <= to, "invalid vertex range {from}..{to}");
        assert!(
            to as usize <= self.num_vertices,
            "vertex range end {to} out of bounds"
        );
        for (&source, &destination) in self.sources.iter().zip(&self.destinations) {
            if (from..to).contains(&destination) {
                relax.relax(source, destination);
            }
        }
    }

    /// Direct pass over the edge list, without the range filter.
    fn edge_map<R: Relax>(&self, relax: &R) {
        for (&source, &destination) in self.sources.iter().zip(&self.destinations) {
            relax.relax(source, destination);
        }
    }

    fn out_degree(&self) -> Vec<u32> {
        let mut degrees = vec![0u32; self.num_vertices];
        for &source in &self.sources {
            degrees[source as usize] += 1;
        }
        degrees
    }
}
