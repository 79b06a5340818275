//! Transfer accounting.

use std::time::Duration;
use tokio::time::Instant;

/// Running counters for one object copy run.
#[derive(Clone, Debug)]
pub struct TransferStats {
    total: usize,
    succeeded: usize,
    failed: usize,
    log_every: usize,
    started: Instant,
}

impl TransferStats {
    pub fn new(total: usize, log_every: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            log_every: log_every.max(1),
            started: Instant::now(),
        }
    }

    /// Record a successful transfer. Returns true when a progress line is due.
    pub fn record_success(&mut self) -> bool {
        self.succeeded += 1;
        self.succeeded % self.log_every == 0
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.succeeded + self.failed == self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Successful transfers per second, over at least one whole second.
    pub fn rate(&self) -> f64 {
        throughput(self.succeeded, self.elapsed())
    }
}

/// `count / max(1, whole elapsed seconds)`.
pub fn throughput(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs().max(1);
    count as f64 / secs as f64
}
