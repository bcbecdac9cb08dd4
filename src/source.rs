use crate::{
    config::Config,
    types::{SymbolOf, Target},
};
use core::fmt::Debug;
use rand::Rng;

/// Policy a worker consults to decide which symbol it contributes.
///
/// One source instance is shared by every worker of every round in a trial,
/// so implementations are called concurrently and must not rely on exclusive
/// access.
pub trait SymbolSource<C: Config>: Debug + Send + Sync + 'static {
    /// Produce the contribution of a worker whose designated symbol is
    /// `assigned`.
    ///
    /// Only called for non-empty targets: a round over an empty target spawns
    /// no workers.
    fn pick(&self, assigned: &SymbolOf<C>, target: &Target<SymbolOf<C>>) -> SymbolOf<C>;
}

/// Every worker emits its own designated symbol.
///
/// Under multiset matching every round succeeds, which makes this source the
/// reference for testing the synchronization itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignedSymbol;

impl<C: Config> SymbolSource<C> for AssignedSymbol {
    fn pick(&self, assigned: &SymbolOf<C>, _target: &Target<SymbolOf<C>>) -> SymbolOf<C> {
        assigned.clone()
    }
}

/// Every worker draws uniformly from the target's positions, ignoring the
/// symbol it was assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSymbol;

impl<C: Config> SymbolSource<C> for RandomSymbol {
    fn pick(&self, assigned: &SymbolOf<C>, target: &Target<SymbolOf<C>>) -> SymbolOf<C> {
        if target.is_empty() {
            return assigned.clone();
        }
        let position = rand::rng().random_range(0..target.len());
        target[position].clone()
    }
}
