use crate::{
    barrier::CompletionSignal,
    config::Config,
    counter::ContributionCounter,
    source::SymbolSource,
    sync::{Arc, Mutex},
    types::{SymbolOf, Target},
};
use std::sync::PoisonError;

/// Everything one worker thread owns for the duration of a round.
pub(super) struct Worker<C: Config> {
    pub(super) assigned: SymbolOf<C>,
    pub(super) target: Target<SymbolOf<C>>,
    pub(super) source: Arc<C::Source>,
    pub(super) buffer: Arc<Mutex<Vec<SymbolOf<C>>>>,
    pub(super) counter: Arc<ContributionCounter>,
    pub(super) signal: CompletionSignal,
}

impl<C: Config> Worker<C> {
    pub(super) fn run(self) {
        let Self {
            assigned,
            target,
            source,
            buffer,
            counter,
            signal,
        } = self;
        let symbol = source.pick(&assigned, &target);
        buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(symbol);
        counter.record();
        signal.arrive();
    }
}
