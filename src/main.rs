//! Rendezvous experiment CLI.
//!
//! Rebuilds a target string with one thread per character, retrying until a
//! round matches, and prints how many contributions each trial took.

use std::{io, num::NonZeroU64};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rendezvous::{
    config::{AssignedChars, Config, RandomChars},
    convergence::{ConvergenceLoop, LineReport, MatchPolicy, Report, RetryPolicy},
    source::{AssignedSymbol, RandomSymbol},
};

#[derive(Parser)]
#[command(name = "rendezvous")]
#[command(version)]
#[command(about = "Reassemble a string from concurrent workers until a round matches")]
struct Cli {
    /// Target string to reassemble
    #[arg(long, default_value = "Yanundand")]
    target: String,

    /// Number of independent trials
    #[arg(long, default_value = "100")]
    trials: usize,

    /// How a round's buffer is compared with the target
    #[arg(long, value_enum, default_value_t = Policy::Multiset)]
    policy: Policy,

    /// How each worker chooses its symbol
    #[arg(long, value_enum, default_value_t = Source::Assigned)]
    source: Source,

    /// Give up a trial after this many rounds (unbounded if omitted)
    #[arg(long)]
    max_rounds: Option<NonZeroU64>,

    /// Run trials concurrently
    #[arg(long)]
    parallel: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Any order of the target's symbols matches
    Multiset,
    /// Only the target's exact order matches
    Ordered,
}

#[derive(Clone, Copy, ValueEnum)]
enum Source {
    /// Each worker emits the symbol of its own position
    Assigned,
    /// Each worker draws a random symbol of the target
    Random,
}

impl From<Policy> for MatchPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Multiset => Self::Multiset,
            Policy::Ordered => Self::Ordered,
        }
    }
}

fn drive<C: Config<Symbol = char>>(cli: &Cli, source: C::Source) -> Result<()> {
    let experiment = ConvergenceLoop::<C>::new(cli.target.as_str(), source)
        .with_match_policy(cli.policy.into())
        .with_retry_policy(cli.max_rounds.into());
    let mut report = LineReport::new(io::stdout().lock());
    if cli.parallel {
        run_parallel(&experiment, cli.trials, &mut report)?;
    } else {
        experiment.run_reported(cli.trials, &mut report)?;
    }
    Ok(())
}

#[cfg(not(feature = "loom"))]
fn run_parallel<C: Config>(
    experiment: &ConvergenceLoop<C>,
    trials: usize,
    report: &mut impl Report,
) -> Result<()> {
    for (trial, result) in experiment.run_parallel(trials)?.iter().enumerate() {
        report.trial_finished(trial, result)?;
    }
    Ok(())
}

#[cfg(feature = "loom")]
fn run_parallel<C: Config>(
    _experiment: &ConvergenceLoop<C>,
    _trials: usize,
    _report: &mut impl Report,
) -> Result<()> {
    anyhow::bail!("parallel trials are unavailable in loom builds")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if cli.verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        }))
        .with_writer(io::stderr)
        .init();

    match cli.source {
        Source::Assigned => drive::<AssignedChars>(&cli, AssignedSymbol),
        Source::Random => drive::<RandomChars>(&cli, RandomSymbol),
    }
}
