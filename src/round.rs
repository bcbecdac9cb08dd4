mod worker;

use crate::{
    barrier::CompletionBarrier,
    config::Config,
    counter::ContributionCounter,
    round::worker::Worker,
    sync::{Arc, JoinHandle, Mutex, spawn_named},
    types::{SymbolOf, Target},
};
use derive_more::Debug;
use std::{io, mem, sync::PoisonError};
use thiserror::Error;
use tracing::trace;

/// Error returned by `RendezvousRound::run`.
///
/// Whatever the variant, the round has already waited for every worker that
/// was started, so no worker of a failed round is still touching its buffer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoundError {
    /// The OS refused to start the worker for `position`.
    #[error("failed to spawn worker for position {position}")]
    Spawn {
        /// Target position whose worker could not be started.
        position: usize,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// One or more workers panicked before contributing.
    #[error("{panicked} worker(s) panicked")]
    WorkerPanicked {
        /// Number of workers that panicked.
        panicked: usize,
    },
}

/// A single spawn/append/barrier attempt at reassembling a target.
///
/// Each `run` fans out one thread per target position. Every worker appends
/// its symbol to a buffer owned by that run alone, bumps the shared
/// `ContributionCounter`, and arrives at a `CompletionBarrier`. The buffer is
/// read only once the barrier has released, so its length always equals the
/// target's. The order of the symbols inside is whatever order the workers
/// acquired the lock in.
#[must_use]
#[derive(Debug)]
pub struct RendezvousRound<C: Config> {
    target: Target<SymbolOf<C>>,
    #[debug(skip)]
    source: Arc<C::Source>,
    counter: Arc<ContributionCounter>,
}

impl<C: Config> RendezvousRound<C> {
    /// Bind a round to its target, symbol source and the trial's counter.
    ///
    /// The counter is shared with every other round of the same trial and
    /// keeps counting across `run` calls.
    pub fn new(
        target: Target<SymbolOf<C>>,
        source: Arc<C::Source>,
        counter: Arc<ContributionCounter>,
    ) -> Self {
        Self {
            target,
            source,
            counter,
        }
    }

    /// Target this round reassembles.
    #[must_use]
    pub fn target(&self) -> &Target<SymbolOf<C>> {
        &self.target
    }

    /// Counter this round contributes to.
    #[must_use]
    pub fn counter(&self) -> &ContributionCounter {
        &self.counter
    }

    /// Run one round and return the assembled symbols.
    ///
    /// Blocks until all workers have arrived at the barrier. A target of
    /// length zero spawns nothing and returns an empty buffer at once.
    ///
    /// # Errors
    /// `RoundError::Spawn` if a worker thread could not be started, and
    /// `RoundError::WorkerPanicked` if any worker panicked. In both cases the
    /// counter keeps whatever contributions were made.
    ///
    /// # Panics
    /// If the released buffer does not hold one symbol per worker. Impossible
    /// if there are no bugs in the code.
    pub fn run(&self) -> Result<Vec<SymbolOf<C>>, RoundError> {
        let Self {
            target,
            source,
            counter,
        } = self;
        let parties = target.len();
        let buffer = Arc::new(Mutex::new(Vec::with_capacity(parties)));
        let (barrier, signals) = CompletionBarrier::with_signals(parties);

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(parties);
        let mut spawn_error = None;
        for (position, (assigned, signal)) in target.iter().zip(signals).enumerate() {
            let worker = Worker::<C> {
                assigned: assigned.clone(),
                target: target.clone(),
                source: source.clone(),
                buffer: buffer.clone(),
                counter: counter.clone(),
                signal,
            };
            // A worker that fails to start is dropped together with its signal,
            // so the barrier still counts it as arrived.
            match spawn_named(format!("rendezvous-worker-{position}"), move || worker.run()) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    spawn_error = Some(RoundError::Spawn {
                        position,
                        source: err,
                    });
                    break;
                }
            }
        }

        barrier.wait();
        trace!(parties, spawned = handles.len(), "round barrier released");

        let panicked = handles
            .into_iter()
            .map(JoinHandle::join)
            .filter(Result::is_err)
            .count();
        if let Some(err) = spawn_error {
            return Err(err);
        }
        if panicked > 0 {
            return Err(RoundError::WorkerPanicked { panicked });
        }

        let symbols = mem::take(&mut *buffer.lock().unwrap_or_else(PoisonError::into_inner));
        assert_eq!(symbols.len(), parties, "RendezvousRound::run: [1]");
        Ok(symbols)
    }
}
