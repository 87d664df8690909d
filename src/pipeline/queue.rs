//! A bounded, blocking, multi-producer multi-consumer channel.
//!
//! This is the shared work queue of the pipelined traversal. It differs from
//! `std::sync::mpsc` in two ways the engine needs: any number of receivers
//! may drain it concurrently, and insertion blocks once `capacity` values
//! are resident, which is what bounds the memory of the whole pipeline.
//!
//! Termination is signaled by handle lifetime rather than a sentinel value:
//! when the last [`Sender`] drops, blocked receivers drain whatever remains
//! and then observe [`RecvError`]. Because a sender's drop is ordered after
//! its final `send` under the same mutex, a receiver can never observe
//! "disconnected" while a block it should have seen is still in flight.
//! Symmetrically, when the last [`Receiver`] drops, blocked senders wake and
//! fail, which is the cooperative-cancellation path for producers.

use crossbeam_utils::CachePadded;
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

/// Error returned by [`Sender::send`] when every receiver is gone; carries
/// the rejected value back to the caller.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SendError<T>(pub T);

/// Error returned by [`Receiver::recv`] once every sender is gone and the
/// buffer is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecvError;

struct State<T> {
    buffer: VecDeque<T>,
    senders: usize,
    receivers: usize,
}

struct Shared<T> {
    state: CachePadded<Mutex<State<T>>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

/// The inserting half of the channel. Cloned once per producer.
pub(crate) struct Sender<T> {
    shared: Arc<Shared<T>>,
}

/// The draining half of the channel. Cloned once per consumer.
pub(crate) struct Receiver<T> {
    shared: Arc<Shared<T>>,
}

/// Creates a channel holding at most `capacity` values.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub(crate) fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    assert!(capacity > 0, "queue capacity must be > 0");
    let shared = Arc::new(Shared {
        state: CachePadded::new(Mutex::new(State {
            buffer: VecDeque::with_capacity(capacity),
            senders: 1,
            receivers: 1,
        })),
        not_empty: Condvar::new(),
        not_full: Condvar::new(),
        capacity,
    });
    (
        Sender {
            shared: Arc::clone(&shared),
        },
        Receiver { shared },
    )
}

impl<T> Sender<T> {
    /// Inserts a value, blocking while the channel is full.
    ///
    /// Fails only when no receiver remains, handing the value back; a sender
    /// suspended on a full channel is woken by the last receiver's drop and
    /// takes the same failure path.
    pub(crate) fn send(&self, value: T) -> Result<(), SendError<T>> {
        let mut state = self.shared.state.lock().unwrap();
        while state.buffer.len() == self.shared.capacity && state.receivers > 0 {
            state = self.shared.not_full.wait(state).unwrap();
        }
        if state.receivers == 0 {
            return Err(SendError(value));
        }
        state.buffer.push_back(value);
        drop(state);
        self.shared.not_empty.notify_one();
        Ok(())
    }

}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.shared.state.lock().unwrap().senders += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock().unwrap();
        state.senders -= 1;
        let closed = state.senders == 0;
        drop(state);
        if closed {
            self.shared.not_empty.notify_all();
        }
    }
}

impl<T> Receiver<T> {
    /// Removes the oldest value, blocking while the channel is empty but
    /// still open.
    ///
    /// Returns [`RecvError`] only once every sender has dropped *and* the
    /// buffer is drained, so "temporarily empty" and "no more values will
    /// ever arrive" are distinct outcomes.
    pub(crate) fn recv(&self) -> Result<T, RecvError> {
        let mut state = self.shared.state.lock().unwrap();
        loop {
            if let Some(value) = state.buffer.pop_front() {
                drop(state);
                self.shared.not_full.notify_one();
                return Ok(value);
            }
            if state.senders == 0 {
                return Err(RecvError);
            }
            state = self.shared.not_empty.wait(state).unwrap();
        }
    }

    /// Values currently resident, for queue-depth assertions.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.shared.state.lock().unwrap().buffer.len()
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        self.shared.state.lock().unwrap().receivers += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock().unwrap();
        state.receivers -= 1;
        let cancelled = state.receivers == 0;
        drop(state);
        if cancelled {
            self.shared.not_full.notify_all();
        }
    }
}
