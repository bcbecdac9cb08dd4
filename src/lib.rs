//! Concurrent randomized-rendezvous generator.
//!
//! A target sequence of symbols is reassembled by fanning out one worker
//! thread per target position. Each worker:
//! - Chooses a symbol through a `SymbolSource`.
//! - Appends it to a buffer shared by the round, under a mutex.
//! - Bumps a lock-free `ContributionCounter` shared by the whole trial.
//! - Arrives at a `CompletionBarrier`.
//!
//! Only once the barrier releases is the buffer read and compared with the
//! target. A mismatching round is discarded and retried from scratch; the
//! counter keeps every contribution, failed rounds included.
//!
//! Key modules:
//! - `config`: binds a symbol type and a symbol source via the `Config` trait.
//! - `source`: the `SymbolSource` policy and its stock implementations.
//! - `barrier` and `counter`: the synchronization primitives of a round.
//! - `round`: `RendezvousRound`, one spawn/append/barrier attempt.
//! - `convergence`: `ConvergenceLoop`, retry-until-match trials and reporting.
//!
//! Quick start:
//! 1. Pick a `Config`, e.g. `AssignedChars` or `RandomChars`.
//! 2. Build a `ConvergenceLoop` from a target and a source, optionally with a
//!    `MatchPolicy` and a `RetryPolicy`.
//! 3. Call `run`, `run_reported` or `run_parallel` with a trial count.
//!
//! ```no_run
//! use rendezvous::{
//!     config::AssignedChars, convergence::ConvergenceLoop, source::AssignedSymbol,
//! };
//!
//! let results = ConvergenceLoop::<AssignedChars>::new("Yan", AssignedSymbol)
//!     .run(1)
//!     .expect("assigned symbols always converge");
//! assert_eq!(results[0].contributions, 3);
//! ```

/// The `CompletionBarrier` wait-group and its `CompletionSignal` tokens.
pub mod barrier;
/// Public interface to configure rounds and loops.
///
/// Exposes the `Config` trait, which binds the symbol type and the symbol
/// source for a concrete instantiation, plus ready-made character configs.
pub mod config;
/// Retry-until-match orchestration over many trials.
///
/// Contains `ConvergenceLoop`, its match and retry policies, the explicit
/// `TrialState` machine and the `Report` sink for per-trial results.
pub mod convergence;
/// The lock-free `ContributionCounter`.
pub mod counter;
/// One concurrent attempt at reassembling the target.
pub mod round;
/// Policies deciding which symbol a worker contributes.
pub mod source;
mod sync;
/// Core types used across the crate: `Target`, the `Symbol` bound and
/// aliases.
pub mod types;
mod utils;
