//! One-shot reload flag for shells that adopt a new cache version

use std::sync::atomic::{AtomicBool, Ordering};

/// Lets a consumer reload at most once per activation it observes
///
/// Create one guard per page load (or shell start). Every activation
/// notification calls [`claim`](Self::claim); only the first call wins.
#[derive(Debug, Default)]
pub struct ReloadGuard {
    fired: AtomicBool,
}

impl ReloadGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// `true` exactly once for the lifetime of the guard
    pub fn claim(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
