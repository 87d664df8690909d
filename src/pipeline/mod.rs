//! The pipelined parallel edge-traversal engine.
//!
//! The engine splits a traversal into two pools of scoped worker threads
//! joined by a bounded queue of fixed-size edge blocks:
//!
//! - *Producers* each own a contiguous, disjoint vertex range. They walk
//!   their ranges through the adjacency store in increasing vertex and edge
//!   order, batching `(source, destination)` pairs into blocks and pushing
//!   full blocks onto the queue, suspending while it is full.
//! - *Consumers* pull blocks and invoke the relax callback once per edge.
//!
//! Completion needs no sentinel: each producer holds its own queue sender
//! handle and releases it on every exit path, so when the last producer
//! finishes, consumers drain what remains and observe the channel closing.
//! The orchestrating call then performs a structured join (producers first,
//! then consumers) and reports [`GraphError::Interrupted`] if any worker
//! panicked or stopped early.

mod block;
mod partition;
pub(crate) mod queue;

#[cfg(test)]
mod tests;

use crate::error::{GraphError, Result};
use crate::graph::{CscGraph, Relax};
use block::EdgeBlock;
use std::num::NonZeroUsize;
use std::ops::Range;
use tracing::{debug, trace};

pub(crate) use partition::vertex_ranges;

/// Blocks the queue holds before producers suspend.
const DEFAULT_QUEUE_CAPACITY: usize = 128;

/// Worker-pool sizing for [`CscGraph::edge_map_pipelined`].
///
/// The engine never reads ambient hardware state; whatever policy derives
/// the counts lives at the call site, with [`PipelineConfig::default`]
/// providing the usual one. Both pools need at least one worker.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Producer threads walking the adjacency store.
    pub producers: usize,
    /// Consumer threads invoking the relax callback.
    pub consumers: usize,
    /// Bounded queue capacity, in blocks.
    pub queue_capacity: usize,
}

impl PipelineConfig {
    /// Explicit pool sizes with the default queue capacity.
    pub fn new(producers: usize, consumers: usize) -> Self {
        Self {
            producers,
            consumers,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl Default for PipelineConfig {
    /// Splits the available hardware parallelism (at least two threads)
    /// evenly between the pools, giving each at least one worker.
    fn default() -> Self {
        let threads = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(2)
            .max(2);
        let producers = (threads / 2).max(1);
        let consumers = (threads - producers).max(1);
        Self::new(producers, consumers)
    }
}

impl CscGraph {
    /// Applies `relax` to every edge using the pipelined parallel engine.
    ///
    /// Every edge is delivered exactly once, but across consumers edges on
    /// different destination vertices interleave arbitrarily; `relax` must
    /// synchronize any shared per-vertex state itself. At most
    /// `queue_capacity` blocks are ever resident, so memory stays bounded
    /// regardless of graph size or consumer speed.
    ///
    /// # Errors
    ///
    /// [`GraphError::Interrupted`] if any worker panicked (for instance, a
    /// panicking `relax`) or stopped before finishing its range. The edge
    /// multiset delivered in that case is unspecified and the whole
    /// computation must be treated as failed; re-invoke to retry.
    ///
    /// # Panics
    ///
    /// Panics if either pool size or the queue capacity is zero.
    pub fn edge_map_pipelined<R: Relax>(&self, relax: &R, config: &PipelineConfig) -> Result<()> {
        assert!(config.producers >= 1, "need at least one producer");
        assert!(config.consumers >= 1, "need at least one consumer");
        assert!(config.queue_capacity >= 1, "queue capacity must be > 0");

        #[allow(clippy::cast_possible_truncation)]
        let num_vertices = self.num_vertices() as u32;
        debug!(
            vertices = self.num_vertices(),
            edges = self.num_edges(),
            producers = config.producers,
            consumers = config.consumers,
            queue_capacity = config.queue_capacity,
            "starting pipelined edge map"
        );

        let (sender, receiver) = queue::bounded::<EdgeBlock>(config.queue_capacity);
        let mut failed = 0usize;

        std::thread::scope(|scope| {
            let mut producers = Vec::with_capacity(config.producers);
            for range in vertex_ranges(num_vertices, config.producers) {
                let sender = sender.clone();
                producers.push(scope.spawn(move || produce_range(self, range, &sender)));
            }
            // The workers hold the only remaining handles; dropping ours
            // makes "last producer exits" and "channel closes" coincide.
            drop(sender);

            let mut consumers = Vec::with_capacity(config.consumers);
            for _ in 0..config.consumers {
                let receiver = receiver.clone();
                consumers.push(scope.spawn(move || drain_blocks(&receiver, relax)));
            }
            drop(receiver);

            // Structured join: producers first, then consumers. A worker
            // "signals" by terminating, which it does on every path.
            for handle in producers {
                match handle.join() {
                    Ok(true) => {}
                    Ok(false) | Err(_) => failed += 1,
                }
            }
            for handle in consumers {
                if handle.join().is_err() {
                    failed += 1;
                }
            }
        });

        if failed > 0 {
            return Err(GraphError::Interrupted {
                failed,
                workers: config.producers + config.consumers,
            });
        }
        debug!("pipelined edge map complete");
        Ok(())
    }
}

/// Walks one producer's vertex range, batching edges into blocks.
///
/// Returns `false` if the channel was cancelled under it (every consumer
/// gone), in which case the remainder of the range is abandoned. The sender
/// handle is released when the calling thread unwinds or returns, on every
/// path.
fn produce_range(graph: &CscGraph, range: Range<u32>, sender: &queue::Sender<EdgeBlock>) -> bool {
    let reaches_end = range.end as usize == graph.num_vertices();
    let mut block = EdgeBlock::new();
    for vertex in range {
        for edge in graph.edge_range(vertex) {
            if block.is_full() && sender.send(std::mem::take(&mut block)).is_err() {
                trace!(vertex, "producer stopping early, all consumers gone");
                return false;
            }
            block.push(graph.source_at(edge), vertex);
        }
    }
    if !block.is_empty() {
        block.is_last = reaches_end;
        if sender.send(block).is_err() {
            return false;
        }
    }
    trace!("producer finished its range");
    true
}

/// Drains blocks until the channel closes, relaxing every edge in block
/// order.
fn drain_blocks<R: Relax>(receiver: &queue::Receiver<EdgeBlock>, relax: &R) {
    while let Ok(block) = receiver.recv() {
        for (source, destination) in block.edges() {
            relax.relax(source, destination);
        }
    }
    trace!("consumer finished, queue closed and drained");
}
