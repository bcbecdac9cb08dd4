use crate::sync::{AtomicU64, Ordering};

/// Lock-free tally of worker contributions within one trial.
///
/// Only ever incremented; a trial starts from a fresh counter instead of
/// resetting a shared one. Increments are `Relaxed` and independent of the
/// buffer lock. Totals are read after the round barrier has released.
#[derive(Debug)]
pub struct ContributionCounter(AtomicU64);

impl ContributionCounter {
    /// A counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Count one contribution and return the new total.
    pub fn record(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current total.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for ContributionCounter {
    fn default() -> Self {
        Self::new()
    }
}
