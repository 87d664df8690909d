//! Sparse adjacency encodings and the traversal contract they share.
//!
//! Encodings are tagged implementations of one capability, [`SparseGraph`],
//! rather than a hierarchy: each stores the same edge set in a different
//! layout and knows how to walk it. All of them are immutable after
//! construction and therefore freely shared by reference across threads.

pub mod coo;
pub mod csc;
pub mod csr;

pub use coo::CooGraph;
pub use csc::CscGraph;
pub use csr::CsrGraph;

/// The per-edge callback of a traversal.
///
/// `relax` is invoked once per edge with the edge's endpoints. Parallel
/// strategies call it concurrently from several worker threads, on edges
/// with arbitrary interleaving across *different* destination vertices; if
/// the implementation folds into shared per-destination state, it must
/// synchronize that access itself (atomics are the usual choice). The engine
/// never serializes by destination.
pub trait Relax: Sync {
    /// Folds the contribution of the edge `source -> destination`.
    fn relax(&self, source: u32, destination: u32);
}

impl<F> Relax for F
where
    F: Fn(u32, u32) + Sync,
{
    #[inline]
    fn relax(&self, source: u32, destination: u32) {
        self(source, destination);
    }
}

/// Common traversal capability of the adjacency encodings.
///
/// Vertex ids are dense `u32` values in `[0, num_vertices)`. The multiset of
/// `(source, destination)` pairs delivered by [`edge_map`](Self::edge_map)
/// is exactly the stored edge set: no edge duplicated, none dropped.
pub trait SparseGraph {
    /// Number of vertices `V`.
    fn num_vertices(&self) -> usize;

    /// Number of directed edges `E`.
    fn num_edges(&self) -> usize;

    /// Applies `relax` to every edge whose owning vertex lies in
    /// `[from, to)`, in a single thread.
    ///
    /// "Owning vertex" is the vertex axis the encoding partitions by:
    /// destination columns for [`CscGraph`] and [`CooGraph`], source rows
    /// for [`CsrGraph`]. Partitioning `[0, V)` into disjoint ranges and
    /// traversing each range once covers every edge exactly once.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to > num_vertices`.
    fn ranged_edge_map<R: Relax>(&self, relax: &R, from: u32, to: u32);

    /// Applies `relax` to every edge, in a single thread.
    fn edge_map<R: Relax>(&self, relax: &R) {
        #[allow(clippy::cast_possible_truncation)]
        let to = self.num_vertices() as u32;
        self.ranged_edge_map(relax, 0, to);
    }

    /// Counts, for every vertex, the edges that leave it.
    ///
    /// Entry `v` of the returned vector is the number of edges whose source
    /// is `v`. One `O(E)` pass for source-flat encodings, `O(V)` for
    /// [`CsrGraph`].
    fn out_degree(&self) -> Vec<u32>;
}
