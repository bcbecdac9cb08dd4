mod policy;
mod report;

pub use crate::convergence::{
    policy::{MatchPolicy, RetryPolicy},
    report::{LineReport, Report},
};
use crate::{
    config::Config,
    counter::ContributionCounter,
    round::{RendezvousRound, RoundError},
    sync::Arc,
    types::{SymbolOf, Target},
};
use derive_more::{Debug, Display};
use std::io;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Outcome of one successful trial.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display("{contributions} contributions over {rounds} round(s)")]
pub struct TrialResult {
    /// Rounds executed, the matching one included.
    pub rounds: u64,
    /// Counter value when the matching round was observed. Contributions of
    /// failed rounds are included.
    pub contributions: u64,
}

/// Error returned when a trial, or a run of trials, cannot produce a result.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvergenceError {
    /// The retry bound was reached without a matching round.
    #[error("no match after {rounds} round(s) and {contributions} contributions")]
    Exhausted {
        /// Rounds executed before giving up.
        rounds: u64,
        /// Contributions counted before giving up.
        contributions: u64,
    },
    /// A round failed to run.
    #[error(transparent)]
    Round(#[from] RoundError),
    /// The report sink failed.
    #[error("failed to report trial result")]
    Report(#[source] io::Error),
}

/// Where a trial currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// `rounds` rounds ran without a match and another may start.
    Retrying {
        /// Rounds executed so far.
        rounds: u64,
    },
    /// A round matched.
    Succeeded(TrialResult),
    /// The retry bound was reached.
    Exhausted {
        /// Rounds executed.
        rounds: u64,
        /// Contributions counted.
        contributions: u64,
    },
}

/// Drives `RendezvousRound`s until one matches, once per trial.
///
/// Every trial gets a fresh `ContributionCounter` shared by all of its rounds,
/// so a trial's result counts the work of failed rounds too.
#[must_use]
#[derive(Debug)]
pub struct ConvergenceLoop<C: Config> {
    target: Target<SymbolOf<C>>,
    #[debug(skip)]
    source: Arc<C::Source>,
    match_policy: MatchPolicy,
    retry_policy: RetryPolicy,
}

impl<C: Config> ConvergenceLoop<C> {
    /// Loop over `target` with multiset matching and unbounded retries.
    pub fn new(target: impl Into<Target<SymbolOf<C>>>, source: C::Source) -> Self {
        Self {
            target: target.into(),
            source: Arc::new(source),
            match_policy: MatchPolicy::default(),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Compare assembled buffers with `policy`.
    pub fn with_match_policy(self, policy: MatchPolicy) -> Self {
        Self {
            match_policy: policy,
            ..self
        }
    }

    /// Bound the rounds per trial with `policy`.
    pub fn with_retry_policy(self, policy: RetryPolicy) -> Self {
        Self {
            retry_policy: policy,
            ..self
        }
    }

    /// Target every round reassembles.
    #[must_use]
    pub fn target(&self) -> &Target<SymbolOf<C>> {
        &self.target
    }

    /// Run rounds until one matches.
    ///
    /// # Errors
    /// `ConvergenceError::Exhausted` once the retry policy forbids another
    /// round, or `ConvergenceError::Round` if a round fails.
    pub fn run_trial(&self) -> Result<TrialResult, ConvergenceError> {
        let round = RendezvousRound::<C>::new(
            self.target.clone(),
            self.source.clone(),
            Arc::new(ContributionCounter::new()),
        );
        let mut state = TrialState::Retrying { rounds: 0 };
        loop {
            state = match state {
                TrialState::Retrying { rounds } => self.step(&round, rounds)?,
                TrialState::Succeeded(result) => return Ok(result),
                TrialState::Exhausted {
                    rounds,
                    contributions,
                } => {
                    warn!(rounds, contributions, "trial exhausted its retry bound");
                    return Err(ConvergenceError::Exhausted {
                        rounds,
                        contributions,
                    });
                }
            };
        }
    }

    fn step(&self, round: &RendezvousRound<C>, rounds: u64) -> Result<TrialState, RoundError> {
        if !self.retry_policy.allows(rounds) {
            return Ok(TrialState::Exhausted {
                rounds,
                contributions: round.counter().get(),
            });
        }
        let candidate = round.run()?;
        let rounds = rounds + 1;
        if self.match_policy.matches(&candidate, round.target()) {
            return Ok(TrialState::Succeeded(TrialResult {
                rounds,
                contributions: round.counter().get(),
            }));
        }
        debug!(rounds, ?candidate, "round did not match");
        Ok(TrialState::Retrying { rounds })
    }

    /// Run `trials` trials one after another.
    ///
    /// # Errors
    /// The first trial error; later trials are not started.
    pub fn run(&self, trials: usize) -> Result<Vec<TrialResult>, ConvergenceError> {
        let mut results = Vec::with_capacity(trials);
        self.run_reported(trials, &mut results)?;
        Ok(results)
    }

    /// Run `trials` trials one after another, handing each result to `report`
    /// as soon as its trial finishes.
    ///
    /// # Errors
    /// The first trial error, or `ConvergenceError::Report` if the sink fails.
    pub fn run_reported(
        &self,
        trials: usize,
        report: &mut impl Report,
    ) -> Result<(), ConvergenceError> {
        for trial in 0..trials {
            let result = self.run_trial()?;
            info!(
                trial,
                rounds = result.rounds,
                contributions = result.contributions,
                "trial finished"
            );
            report
                .trial_finished(trial, &result)
                .map_err(ConvergenceError::Report)?;
        }
        Ok(())
    }

    /// Run `trials` independent trials concurrently on the rayon pool.
    ///
    /// Results come back in trial order. Each trial still owns its counter, so
    /// the results are those sequential trials would report.
    ///
    /// # Errors
    /// A trial error if any trial fails.
    #[cfg(not(feature = "loom"))]
    pub fn run_parallel(&self, trials: usize) -> Result<Vec<TrialResult>, ConvergenceError> {
        use rayon::prelude::*;

        (0..trials)
            .into_par_iter()
            .map(|trial| -> Result<TrialResult, ConvergenceError> {
                let result = self.run_trial()?;
                info!(
                    trial,
                    rounds = result.rounds,
                    contributions = result.contributions,
                    "trial finished"
                );
                Ok(result)
            })
            .collect()
    }
}
