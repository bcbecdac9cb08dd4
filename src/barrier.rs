use crate::sync::{Arc, Condvar, Mutex};
use derive_more::Debug;
use std::sync::PoisonError;

/// Counting barrier that releases once every issued `CompletionSignal` has
/// arrived.
///
/// Signals are handed out together with the barrier, exactly one per party,
/// and arrive when dropped. A party therefore cannot signal twice, and a party
/// that unwinds or is never started still arrives.
#[derive(Debug)]
pub struct CompletionBarrier {
    #[debug(skip)]
    remaining: Mutex<usize>,
    #[debug(skip)]
    released: Condvar,
}

/// Completion token owned by one party of a `CompletionBarrier`.
#[must_use = "dropping a signal counts as arriving at the barrier"]
#[derive(Debug)]
pub struct CompletionSignal {
    #[debug(skip)]
    barrier: Arc<CompletionBarrier>,
}

impl CompletionBarrier {
    /// Create a barrier for `parties` parties along with their signals.
    ///
    /// With zero parties the barrier is released from the start.
    #[must_use]
    pub fn with_signals(parties: usize) -> (Arc<Self>, Vec<CompletionSignal>) {
        let barrier = Arc::new(Self {
            remaining: Mutex::new(parties),
            released: Condvar::new(),
        });
        let signals = (0..parties)
            .map(|_| CompletionSignal {
                barrier: barrier.clone(),
            })
            .collect();
        (barrier, signals)
    }

    /// Block until every signal has arrived.
    pub fn wait(&self) {
        let mut remaining = self
            .remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while *remaining > 0 {
            remaining = self
                .released
                .wait(remaining)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Number of signals that have not arrived yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        *self
            .remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn arrive(&self) {
        let mut remaining = self
            .remaining
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Signals are only minted in `with_signals`, one per party.
        *remaining = remaining
            .checked_sub(1)
            .expect("CompletionBarrier::arrive: [1]");
        if *remaining == 0 {
            self.released.notify_all();
        }
    }
}

impl CompletionSignal {
    /// Arrive at the barrier now.
    pub fn arrive(self) {
        drop(self);
    }
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        self.barrier.arrive();
    }
}
