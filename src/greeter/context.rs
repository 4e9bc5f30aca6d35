//! Process-scoped load bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared by every load of the greeter within one process.
///
/// The embedder creates one and passes it to each load; commands keep a
/// handle to it so they report the count at call time.
#[derive(Debug, Default)]
pub struct LoadContext {
    loaded: AtomicU64,
}

impl LoadContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed module loads.
    pub fn loaded(&self) -> u64 {
        self.loaded.load(Ordering::Acquire)
    }

    /// Count one more completed load and return the new total.
    pub(crate) fn record_load(&self) -> u64 {
        self.loaded.fetch_add(1, Ordering::AcqRel) + 1
    }
}
