//! Fixed-capacity edge batches, the unit of producer-to-consumer transfer.

/// Edges carried per block.
///
/// Small blocks bound both per-block memory and the staleness window before
/// a consumer can start on a producer's output, at the cost of a little
/// batching overhead.
pub(crate) const BLOCK_CAPACITY: usize = 128;

/// A batch of `(source, destination)` pairs held in two parallel arrays.
///
/// A block is filled by exactly one producer, transferred through the queue
/// by value, and drained by exactly one consumer; it is never aliased.
pub(crate) struct EdgeBlock {
    sources: [u32; BLOCK_CAPACITY],
    destinations: [u32; BLOCK_CAPACITY],
    len: usize,
    /// Set on the final block of the producer whose range reaches the end
    /// of the vertex space. Informational; termination does not depend on it.
    pub(crate) is_last: bool,
}

impl Default for EdgeBlock {
    fn default() -> Self {
        Self {
            sources: [0; BLOCK_CAPACITY],
            destinations: [0; BLOCK_CAPACITY],
            len: 0,
            is_last: false,
        }
    }
}

impl EdgeBlock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends one edge.
    #[inline]
    pub(crate) fn push(&mut self, source: u32, destination: u32) {
        debug_assert!(self.len < BLOCK_CAPACITY, "push into a full block");
        self.sources[self.len] = source;
        self.destinations[self.len] = destination;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == BLOCK_CAPACITY
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid `(source, destination)` pairs, in insertion order.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.sources[..self.len]
            .iter()
            .copied()
            .zip(self.destinations[..self.len].iter().copied())
    }
}
