use std::sync::atomic::{AtomicBool, Ordering};

/// Feature enablement flag owned by the host settings.
///
/// Polled at the start of every scheduler step.
pub trait FeatureGate: Send + Sync {
    fn enabled(&self) -> bool;
}

impl FeatureGate for AtomicBool {
    #[inline]
    fn enabled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// Gate that never closes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEnabled;

impl FeatureGate for AlwaysEnabled {
    #[inline]
    fn enabled(&self) -> bool {
        true
    }
}
