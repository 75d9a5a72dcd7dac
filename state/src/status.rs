//! Typed validity tracking for the representation groups.
//!
//! Each group enumerates its representations and tracks which cached slots
//! are current with a [`ReprSet`]. Setters replace the whole set with the
//! single written representation (an authoritative write supersedes every
//! cached derivation); derivations insert their own member and leave the
//! rest untouched (deriving B from A does not invalidate A).

use std::marker::PhantomData;

/// A representation kind within one group. `bit` must be a unique small
/// index per member (< 8).
pub trait Repr: Copy {
    fn bit(self) -> u8;
}

/// Small typed set of representation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReprSet<R: Repr> {
    bits: u8,
    _repr: PhantomData<R>,
}

impl<R: Repr> Default for ReprSet<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Repr> ReprSet<R> {
    pub fn empty() -> Self {
        Self {
            bits: 0,
            _repr: PhantomData,
        }
    }

    /// The set holding exactly one member; used by the exclusive setters.
    pub fn only(r: R) -> Self {
        Self {
            bits: 1 << r.bit(),
            _repr: PhantomData,
        }
    }

    pub fn contains(&self, r: R) -> bool {
        self.bits & (1 << r.bit()) != 0
    }

    /// Mark one more representation current; used by the additive
    /// derivations.
    pub fn insert(&mut self, r: R) {
        self.bits |= 1 << r.bit();
    }

    pub fn remove(&mut self, r: R) {
        self.bits &= !(1 << r.bit());
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Two {
        A,
        B,
    }

    impl Repr for Two {
        fn bit(self) -> u8 {
            match self {
                Two::A => 0,
                Two::B => 1,
            }
        }
    }

    #[test]
    fn only_is_exclusive_and_insert_is_additive() {
        let mut s = ReprSet::only(Two::A);
        assert!(s.contains(Two::A) && !s.contains(Two::B));
        s.insert(Two::B);
        assert!(s.contains(Two::A) && s.contains(Two::B));
        let s = ReprSet::only(Two::B);
        assert!(!s.contains(Two::A) && s.contains(Two::B));
    }

    #[test]
    fn empty_set_reports_empty() {
        let s: ReprSet<Two> = ReprSet::empty();
        assert!(s.is_empty());
        assert!(!s.contains(Two::A));
    }
}
