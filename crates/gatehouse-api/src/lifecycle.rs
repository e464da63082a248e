//! Process readiness shared between the server runner and request handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle to the process-wide "ready to serve" flag.
///
/// Starts ready. Flipped once, when shutdown begins.
#[derive(Debug, Clone)]
pub struct Readiness {
    ready: Arc<AtomicBool>,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}

impl Readiness {
    /// Creates a handle in the ready state.
    pub fn new() -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_draining(&self) -> bool {
        !self.is_ready()
    }

    /// Stop advertising readiness. Visible to every clone.
    pub fn mark_draining(&self) {
        self.ready.store(false, Ordering::Release);
    }
}
