use crate::convergence::TrialResult;
use std::io::{self, Write};

/// Sink receiving each trial's result as soon as the trial finishes.
pub trait Report {
    /// Called once per trial, in trial order, with the zero-based index.
    ///
    /// # Errors
    /// Whatever the underlying sink fails with.
    fn trial_finished(&mut self, trial: usize, result: &TrialResult) -> io::Result<()>;
}

/// Writes one human-readable line per trial.
#[derive(Debug)]
pub struct LineReport<W>(W);

impl<W: Write> LineReport<W> {
    /// Report into `writer`.
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Report for LineReport<W> {
    fn trial_finished(&mut self, trial: usize, result: &TrialResult) -> io::Result<()> {
        writeln!(
            self.0,
            "trial {trial}: it took {} contributions over {} round(s)",
            result.contributions, result.rounds
        )
    }
}

impl Report for Vec<TrialResult> {
    fn trial_finished(&mut self, _trial: usize, result: &TrialResult) -> io::Result<()> {
        self.push(*result);
        Ok(())
    }
}
