//! Request generations
//!
//! Each resolve/execute request in an editing session carries a generation
//! token. When the operator changes the entity or clears the site id while a
//! request is in flight, a new generation is issued; the old request keeps
//! running, but its result is discarded instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing tag for an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Issues generations and decides which results are still of interest
#[derive(Debug, Default)]
pub struct QuerySession {
    issued: AtomicU64,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones
    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued generation
    pub fn current(&self) -> Generation {
        Generation(self.issued.load(Ordering::SeqCst))
    }

    /// Whether a generation is still the latest
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.current()
    }

    /// Accept a result only if its generation was not superseded
    pub fn settle<T>(&self, generation: Generation, value: T) -> Option<T> {
        if self.is_current(generation) {
            Some(value)
        } else {
            tracing::debug!("discarding result for superseded request");
            None
        }
    }
}
