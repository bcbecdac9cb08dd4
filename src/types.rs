use crate::config::Config;
use core::{fmt::Debug, hash::Hash};
use derive_more::Deref;
use rustc_hash::FxBuildHasher;
use std::{collections::HashMap as _HashMap, sync::Arc};

/// Anything a worker can contribute to a round.
///
/// Blanket-implemented for every type satisfying the bounds.
pub trait Symbol: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> Symbol for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Symbol type bound to a specific `Config`.
pub type SymbolOf<C> = <C as Config>::Symbol;

pub(crate) type HashMap<K, V> = _HashMap<K, V, FxBuildHasher>;

/// Immutable ordered sequence of symbols a round tries to reassemble.
///
/// Its length is the number of workers spawned per round. Clones share the
/// same storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref)]
#[deref(forward)]
pub struct Target<S>(Arc<[S]>);

impl<S> Target<S> {
    /// Build a target from any sequence of symbols.
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Self {
        symbols.into_iter().collect()
    }

    /// Borrow the symbols in target order.
    #[must_use]
    pub fn as_slice(&self) -> &[S] {
        &self.0
    }
}

impl<S> FromIterator<S> for Target<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S> From<Vec<S>> for Target<S> {
    fn from(symbols: Vec<S>) -> Self {
        Self(symbols.into())
    }
}

impl From<&str> for Target<char> {
    fn from(text: &str) -> Self {
        text.chars().collect()
    }
}
