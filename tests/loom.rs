#![allow(missing_docs)]
#![cfg(feature = "loom")]

use loom::sync::atomic::{AtomicUsize, Ordering};
use rendezvous::{
    barrier::CompletionBarrier,
    config::AssignedChars,
    convergence::{ConvergenceLoop, MatchPolicy, TrialResult},
    counter::ContributionCounter,
    round::RendezvousRound,
    source::AssignedSymbol,
    types::Target,
};
use std::sync::Arc;

fn round(target: &str, counter: &Arc<ContributionCounter>) -> RendezvousRound<AssignedChars> {
    RendezvousRound::new(
        Target::from(target),
        Arc::new(AssignedSymbol),
        counter.clone(),
    )
}

#[test]
fn loom_barrier_publishes_every_party() {
    loom::model(|| {
        let (barrier, signals) = CompletionBarrier::with_signals(2);
        let published = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = signals
            .into_iter()
            .map(|signal| {
                let published = published.clone();
                loom::thread::spawn(move || {
                    published.fetch_add(1, Ordering::Relaxed);
                    signal.arrive();
                })
            })
            .collect();

        barrier.wait();
        // Both parties' writes must be visible once the barrier has released,
        // before any join.
        assert_eq!(published.load(Ordering::Relaxed), 2);
        assert_eq!(barrier.remaining(), 0);

        for handle in handles {
            handle.join().unwrap();
        }
    });
}

#[test]
fn loom_barrier_without_parties_is_released() {
    loom::model(|| {
        let (barrier, signals) = CompletionBarrier::with_signals(0);
        assert!(signals.is_empty());
        barrier.wait();
        assert_eq!(barrier.remaining(), 0);
    });
}

#[test]
fn loom_round_collects_every_contribution() {
    loom::model(|| {
        // Two workers race for the buffer lock; whichever wins, both symbols
        // must be present once `run` returns.
        let counter = Arc::new(ContributionCounter::new());
        let symbols = round("Ya", &counter).run().expect("round must succeed");

        assert_eq!(symbols.len(), 2);
        assert!(MatchPolicy::Multiset.matches(&symbols, &['Y', 'a']));
        assert_eq!(counter.get(), 2);
    });
}

#[test]
fn loom_counter_accumulates_across_rounds() {
    loom::model(|| {
        let counter = Arc::new(ContributionCounter::new());
        let round = round("Y", &counter);

        assert_eq!(round.run().expect("first round must succeed"), vec!['Y']);
        assert_eq!(counter.get(), 1);
        assert_eq!(round.run().expect("second round must succeed"), vec!['Y']);
        assert_eq!(counter.get(), 2);
    });
}

#[test]
fn loom_trial_converges_in_one_round() {
    loom::model(|| {
        let result = ConvergenceLoop::<AssignedChars>::new("an", AssignedSymbol)
            .run_trial()
            .expect("trial must converge");
        assert_eq!(
            result,
            TrialResult {
                rounds: 1,
                contributions: 2,
            }
        );
    });
}
