use crate::types::HashMap;
use core::hash::Hash;
use rustc_hash::FxBuildHasher;

pub(crate) trait MultisetEq {
    fn multiset_eq(&self, other: &Self) -> bool;
}

impl<S: Eq + Hash> MultisetEq for [S] {
    fn multiset_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut tally: HashMap<&S, usize> =
            HashMap::with_capacity_and_hasher(self.len(), FxBuildHasher);
        for symbol in self {
            *tally.entry(symbol).or_default() += 1;
        }
        for symbol in other {
            match tally.get_mut(symbol) {
                Some(left) if *left > 0 => *left -= 1,
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::MultisetEq;

    #[test]
    fn permutations_are_equal() {
        let lhs: Vec<char> = "Yanundand".chars().collect();
        let rhs: Vec<char> = "dnaYnudna".chars().collect();
        assert!(lhs.multiset_eq(&rhs));
    }

    #[test]
    fn multiplicity_matters() {
        let lhs = ['a', 'a', 'b'];
        let rhs = ['a', 'b', 'b'];
        assert!(!lhs.multiset_eq(&rhs));
        assert!(!rhs.multiset_eq(&lhs));
    }

    #[test]
    fn lengths_must_agree() {
        let lhs = ['a', 'b'];
        assert!(!lhs[..].multiset_eq(&lhs[..1]));
        let empty: [char; 0] = [];
        assert!(empty[..].multiset_eq(&empty[..]));
    }
}
