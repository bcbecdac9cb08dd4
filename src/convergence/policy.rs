use crate::utils::MultisetEq;
use core::{hash::Hash, num::NonZeroU64};

/// How an assembled buffer is compared against the target.
///
/// Workers append in lock-acquisition order, which the scheduler decides, so
/// the two policies answer different questions: `Multiset` asks whether every
/// contribution arrived, `Ordered` additionally asks whether they happened to
/// arrive in target order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Same symbols with the same multiplicities, in any order.
    #[default]
    Multiset,
    /// Same symbols in the same left-to-right order.
    Ordered,
}

impl MatchPolicy {
    /// Whether `candidate` matches `target` under this policy.
    #[must_use]
    pub fn matches<S: Eq + Hash>(self, candidate: &[S], target: &[S]) -> bool {
        match self {
            Self::Multiset => candidate.multiset_eq(target),
            Self::Ordered => candidate == target,
        }
    }
}

/// How many rounds a single trial may spend before giving up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RetryPolicy {
    /// Keep retrying until a round matches.
    #[default]
    Unbounded,
    /// Give up after this many rounds without a match.
    AtMost(NonZeroU64),
}

impl RetryPolicy {
    /// Whether another round may start after `rounds` have already run.
    #[must_use]
    pub fn allows(self, rounds: u64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(limit) => rounds < limit.get(),
        }
    }
}

impl From<Option<NonZeroU64>> for RetryPolicy {
    fn from(limit: Option<NonZeroU64>) -> Self {
        limit.map_or(Self::Unbounded, Self::AtMost)
    }
}
