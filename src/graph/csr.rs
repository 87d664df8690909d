//! A compact CSR (compressed sparse row) adjacency store.
//!
//! CSR is the row-major counterpart of [`CscGraph`](crate::CscGraph): for
//! each source vertex the ids of its outgoing edge *destinations* are
//! contiguous, so push-style traversals and out-degree queries are cheap.
//!
//! Memory layout:
//! - `index`: `Vec<usize>` of length `V + 1` (row offsets)
//! - `destinations`: `Vec<u32>` of length `E` (destination vertex id per edge)

use crate::error::{GraphError, Result};
use crate::graph::{Relax, SparseGraph};
use std::ops::Range;

/// An immutable compressed-sparse-row graph.
#[derive(Debug)]
pub struct CsrGraph {
    index: Vec<usize>,
    destinations: Vec<u32>,
}

impl CsrGraph {
    /// Builds a graph directly from CSR parts.
    ///
    /// Mirrors [`CscGraph::from_parts`](crate::CscGraph::from_parts): `index`
    /// must hold `V + 1` monotone offsets from 0 to `destinations.len()`,
    /// and every destination id must lie in `[0, V)`.
    pub fn from_parts(index: Vec<usize>, destinations: Vec<u32>) -> Result<Self> {
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
        if edge_total != destinations.len() {
            return Err(GraphError::Format(format!(
                "index ends at {edge_total} but {} edge destinations are present",
                destinations.len()
            )));
        }
        for (e, &destination) in destinations.iter().enumerate() {
            if destination as usize >= num_vertices {
                return Err(GraphError::Format(format!(
                    "edge {e} has destination {destination}, out of bounds for {num_vertices} vertices"
                )));
            }
        }
        Ok(Self {
            index,
            destinations,
        })
    }

    /// Builds a graph from per-source outgoing destination lists.
    pub fn from_out_adjacency(outgoing: &[Vec<u32>]) -> Result<Self> {
        let total: usize = outgoing.iter().map(Vec::len).sum();
        let mut index = Vec::with_capacity(outgoing.len() + 1);
        let mut destinations = Vec::with_capacity(total);
        index.push(0);
        for list in outgoing {
            destinations.extend_from_slice(list);
            index.push(destinations.len());
        }
        Self::from_parts(index, destinations)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.index.len() - 1
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.destinations.len()
    }

    /// Half-open range of edge indices whose source is `vertex`.
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

    /// Returns the outgoing neighbors of a vertex.
    pub fn out_neighbors(&self, vertex: u32) -> impl Iterator<Item = u32> + '_ {
        self.edge_range(vertex).map(move |e| self.destinations[e])
    }
}

impl SparseGraph for CsrGraph {
    fn num_vertices(&self) -> usize {
        self.index.len() - 1
    }

    fn num_edges(&self) -> usize {
        self.destinations.len()
    }

    /// The range is over *source* rows in this encoding.
    fn ranged_edge_map<R: Relax>(&self, relax: &R, from: u32, to: u32) {
        assert!(from <= to, "invalid vertex range {from}..{to}");
        assert!(
            to as usize <= self.num_vertices(),
            "vertex range end {to} out of bounds"
        );
        for v in from..to {
            for e in self.index[v as usize]..self.index[v as usize + 1] {
                relax.relax(v, self.destinations[e]);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn out_degree(&self) -> Vec<u32> {
        self.index
            .windows(2)
            .map(|pair| (pair[1] - pair[0]) as u32)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn reference() -> CsrGraph {
        // Edges (0->1), (0->2), (1->2), (2->0).
        CsrGraph::from_out_adjacency(&[vec![1, 2], vec![2], vec![0]]).unwrap()
    }

    #[test]
    fn edge_map_visits_each_edge_once() {
        let graph = reference();
        let seen = Mutex::new(Vec::new());
        graph.edge_map(&|src: u32, dst: u32| seen.lock().unwrap().push((src, dst)));
        let mut edges = seen.into_inner().unwrap();
        edges.sort_unstable();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2), (2, 0)]);
    }

    #[test]
    fn ranged_edge_map_restricts_to_source_rows() {
        let graph = reference();
        let seen = Mutex::new(Vec::new());
        graph.ranged_edge_map(&|src: u32, dst: u32| seen.lock().unwrap().push((src, dst)), 0, 1);
        assert_eq!(seen.into_inner().unwrap(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn out_degree_is_row_width() {
        assert_eq!(reference().out_degree(), vec![2, 1, 1]);
    }

    #[test]
    fn out_neighbors_are_contiguous() {
        let graph = reference();
        assert_eq!(graph.out_neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(graph.out_neighbors(2).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn from_parts_rejects_out_of_bounds_destination() {
        let err = CsrGraph::from_parts(vec![0, 1], vec![3]).unwrap_err();
        assert!(matches!(err, GraphError::Format(_)), "got {err:?}");
    }
}
