#![allow(missing_docs)]
#![cfg(not(feature = "loom"))]

use rayon::prelude::*;
use rendezvous::{
    barrier::CompletionBarrier,
    config::{AssignedChars, Config},
    convergence::MatchPolicy,
    counter::ContributionCounter,
    round::{RendezvousRound, RoundError},
    source::{AssignedSymbol, SymbolSource},
    types::{SymbolOf, Target},
};
use std::{sync::Arc, thread};

fn assigned_round<C>(
    target: Target<SymbolOf<C>>,
) -> (RendezvousRound<C>, Arc<ContributionCounter>)
where
    C: Config<Source = AssignedSymbol>,
{
    let counter = Arc::new(ContributionCounter::new());
    let round = RendezvousRound::new(target, Arc::new(AssignedSymbol), counter.clone());
    (round, counter)
}

#[derive(Debug)]
struct Numbers;

impl Config for Numbers {
    type Symbol = u32;
    type Source = AssignedSymbol;
}

#[derive(Debug)]
struct Panicking;

impl SymbolSource<PanickingChars> for Panicking {
    fn pick(&self, assigned: &char, _target: &Target<char>) -> char {
        assert_ne!(*assigned, '!', "worker refuses to emit '!'");
        *assigned
    }
}

#[derive(Debug)]
struct PanickingChars;

impl Config for PanickingChars {
    type Symbol = char;
    type Source = Panicking;
}

#[test]
fn buffer_holds_one_symbol_per_worker() {
    for len in 1..=32u32 {
        let target: Target<u32> = (0..len).collect();
        let (round, counter) = assigned_round::<Numbers>(target.clone());
        let symbols = round.run().expect("round must succeed");

        assert_eq!(symbols.len(), target.len());
        assert!(MatchPolicy::Multiset.matches(&symbols, &target));
        assert_eq!(counter.get(), u64::from(len));
    }
}

#[test]
fn empty_target_spawns_nothing() {
    let (round, counter) = assigned_round::<AssignedChars>(Target::from(""));
    let symbols = round.run().expect("round must succeed");

    assert!(symbols.is_empty());
    assert_eq!(counter.get(), 0);
}

#[test]
fn counter_survives_repeated_rounds() {
    let (round, counter) = assigned_round::<AssignedChars>(Target::from("Yanundand"));
    for runs in 1..=10u64 {
        let symbols = round.run().expect("round must succeed");
        assert_eq!(symbols.len(), 9);
        assert_eq!(counter.get(), runs * 9);
    }
}

#[test]
fn concurrent_rounds_keep_their_buffers_apart() {
    // Each round reassembles a target made of its own index only, so any
    // cross-contamination shows up as a foreign symbol.
    (0..64u32).into_par_iter().for_each(|id| {
        let target: Target<u32> = std::iter::repeat_n(id, 8).collect();
        let (round, counter) = assigned_round::<Numbers>(target);
        for runs in 1..=4u64 {
            let symbols = round.run().expect("round must succeed");
            assert_eq!(symbols, vec![id; 8]);
            assert_eq!(counter.get(), runs * 8);
        }
    });
}

#[test]
fn panicking_worker_is_reported_not_awaited_forever() {
    let counter = Arc::new(ContributionCounter::new());
    let round = RendezvousRound::<PanickingChars>::new(
        Target::from("ab!c"),
        Arc::new(Panicking),
        counter.clone(),
    );

    let err = round.run().expect_err("a worker panics");
    assert!(matches!(err, RoundError::WorkerPanicked { panicked: 1 }));
    // The other three contributions were made and stay counted.
    assert_eq!(counter.get(), 3);
}

#[test]
fn barrier_waits_for_dropped_and_explicit_signals() {
    let (barrier, mut signals) = CompletionBarrier::with_signals(3);
    assert_eq!(barrier.remaining(), 3);

    let explicit = signals.pop().expect("three signals");
    explicit.arrive();
    assert_eq!(barrier.remaining(), 2);

    let handle = thread::spawn(move || drop(signals));
    barrier.wait();
    assert_eq!(barrier.remaining(), 0);
    handle.join().unwrap();
}
