//! Bounded-concurrency work pool.

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::future::Future;

/// Sliding-window scheduler over a queue of work items.
///
/// At most `capacity` futures are in flight. Whenever one completes, the next
/// pending item starts, regardless of which earlier item finished. All futures
/// are polled from the calling task, so completion handlers may mutate local
/// state without synchronization.
#[derive(Clone, Copy, Debug)]
pub struct TransferPool {
    capacity: usize,
}

impl TransferPool {
    /// Create a pool. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Start `start(item)` for every item in order, keeping at most `capacity`
    /// in flight, and hand each output to `on_complete` as it finishes.
    ///
    /// Returns once every item has completed. Items start in iteration order;
    /// completion order is unspecified.
    pub async fn run<I, F, Fut, C>(&self, items: I, mut start: F, mut on_complete: C)
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future,
        C: FnMut(Fut::Output),
    {
        let mut pending = items.into_iter();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < self.capacity {
                let Some(item) = pending.next() else { break };
                in_flight.push(start(item));
            }

            match in_flight.next().await {
                Some(output) => on_complete(output),
                None => break,
            }
        }
    }
}
