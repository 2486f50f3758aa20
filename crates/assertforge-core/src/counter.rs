//! Process-wide count of evaluated assertions.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::info;

/// Atomic assertion counter.
#[derive(Debug, Default)]
pub struct AssertCounter(AtomicUsize);

impl AssertCounter {
    pub const fn new() -> Self {
        Self(AtomicUsize::new(0))
    }

    /// Adds one and returns the new count.
    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns the count and sets it to zero in one atomic exchange.
    pub fn read_and_reset(&self) -> usize {
        self.0.swap(0, Ordering::SeqCst)
    }
}

static GLOBAL: AssertCounter = AssertCounter::new();

/// The counter incremented by every `that` call.
pub fn global() -> &'static AssertCounter {
    &GLOBAL
}

/// Reads and resets the process-wide assertion count.
pub fn assert_count() -> usize {
    let count = GLOBAL.read_and_reset();
    info!(event = "assert_count", count);
    count
}
