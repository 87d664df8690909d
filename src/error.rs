//! Crate-wide error and result types.

use std::io;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by graph construction and traversal.
///
/// Construction errors are reported before any worker thread is spawned and
/// never leave a partially built graph behind. Traversal errors mean the
/// whole computation must be treated as failed; the engine performs no
/// automatic retry.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Underlying file access failed while loading a graph.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input was malformed or internally inconsistent.
    #[error("format error: {0}")]
    Format(String),

    /// One or more worker threads exited before completing their share of a
    /// traversal, so the edge multiset delivered to the callback is
    /// unspecified.
    #[error("edge map interrupted: {failed} of {workers} worker threads exited early")]
    Interrupted {
        /// Workers that panicked or stopped before finishing their range.
        failed: usize,
        /// Total workers the traversal spawned.
        workers: usize,
    },
}
