//! Cooperative cancellation for ordering calls.
//!
//! The engine polls a [`CancellationProbe`] once per declaration while building
//! the call graph and once per component while sequencing. A fired probe turns
//! the whole call into [`Error::Cancelled`](crate::Error::Cancelled).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

/// Something the engine can ask "should I stop?".
pub trait CancellationProbe {
    fn is_cancelled(&self) -> bool;
}

impl<F> CancellationProbe for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Shared flag for cancelling an ordering call from another thread.
///
/// Clones share the flag: cancelling any clone is visible to all of them.
///
/// # Example
///
/// ```
/// use depsort_core::{CancellationProbe, CancellationToken};
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
///
/// assert!(!token.is_cancelled());
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl CancellationProbe for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Return `Err(Cancelled)` if the probe fired.
pub(crate) fn checkpoint(probe: Option<&dyn CancellationProbe>) -> Result<()> {
    match probe {
        Some(p) if p.is_cancelled() => Err(Error::Cancelled),
        _ => Ok(()),
    }
}
