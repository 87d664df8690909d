//! # `edgemill` - Parallel Edge Traversal for Compressed Sparse Graphs
//!
//! A traversal engine for static directed graphs stored in compressed sparse
//! form. The graph is built once, validated, and thereafter shared read-only
//! across threads; a caller-supplied per-edge callback ("relax") is invoked
//! exactly once for every edge, folding a contribution into per-vertex state
//! the caller owns.
//!
//! ## Encodings
//!
//! Three adjacency encodings share the [`SparseGraph`] traversal contract:
//!
//! - [`CscGraph`]: compressed sparse column; incoming edges of each vertex
//!   are contiguous. The only encoding with a pipelined parallel traversal.
//! - [`CsrGraph`]: compressed sparse row; outgoing edges contiguous.
//! - [`CooGraph`]: coordinate list, one (source, destination) pair per edge.
//!
//! ## Execution strategies
//!
//! - Sequential: [`SparseGraph::edge_map`] / [`SparseGraph::ranged_edge_map`].
//! - Partitioned: [`edge_map_partitioned`] spawns one scoped thread per
//!   vertex partition and joins them.
//! - Pipelined: [`CscGraph::edge_map_pipelined`] streams fixed-size edge
//!   blocks from a producer pool through a bounded queue to a consumer pool,
//!   bounding memory while decoupling the walk of the adjacency structure
//!   from the callback work.
//!
//! ## Example
//!
//! ```rust
//! use edgemill::{CscGraph, PipelineConfig, SparseGraph};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! // Edges (2->0), (0->1), (1->1), (2->2), stored column-major.
//! let graph = CscGraph::from_parts(vec![0, 1, 3, 4], vec![2, 0, 1, 2]).unwrap();
//! assert_eq!(graph.out_degree(), vec![1, 1, 2]);
//!
//! // Count incoming edges per vertex; relax may run on any worker thread.
//! let incoming: Vec<AtomicU32> = (0..3).map(|_| AtomicU32::new(0)).collect();
//! let relax = |_src: u32, dst: u32| {
//!     incoming[dst as usize].fetch_add(1, Ordering::Relaxed);
//! };
//! graph
//!     .edge_map_pipelined(&relax, &PipelineConfig::new(1, 1))
//!     .unwrap();
//!
//! let counts: Vec<u32> = incoming.iter().map(|c| c.load(Ordering::Relaxed)).collect();
//! assert_eq!(counts, vec![1, 2, 1]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod graph;
pub mod pipeline;

mod io;
mod partitioned;

pub use error::{GraphError, Result};
pub use graph::{CooGraph, CscGraph, CsrGraph, Relax, SparseGraph};
pub use partitioned::edge_map_partitioned;
pub use pipeline::PipelineConfig;
