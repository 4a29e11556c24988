//! Pip-set primitives.
//!
//! A `PipSet` is a set of board positions packed into a `u32`: bit 0 is the
//! bar, bits 1..=24 the playable points, bits 25..=30 synthetic bear-off
//! slots used to mark overshooting destinations as available. Iteration is
//! lowest-pip-first by repeated lowest-bit extraction.

use std::ops::{BitAnd, BitOr};

/// Board position index: 0 = bar, 1..=24 points, 25 = finished.
pub type Pip = usize;

/// Die face value, 1..=6.
pub type Die = usize;

/// A set of pips in a 32-bit word.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct PipSet(pub u32);

impl PipSet {
    pub const EMPTY: PipSet = PipSet(0);

    #[inline]
    pub fn bit(p: Pip) -> PipSet {
        debug_assert!(p < 32);
        PipSet(1 << p)
    }

    #[inline]
    pub fn contains(self, p: Pip) -> bool {
        p < 32 && self.0 & (1 << p) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest member. Meaningless on the empty set.
    #[inline]
    pub fn lowest(self) -> Pip {
        debug_assert!(!self.is_empty());
        self.0.trailing_zeros() as Pip
    }

    /// The set with its lowest member removed.
    #[inline]
    pub fn without_lowest(self) -> PipSet {
        PipSet(self.0 & (self.0 - 1))
    }

    #[inline]
    pub fn inserted(self, p: Pip) -> PipSet {
        PipSet(self.0 | (1 << p))
    }

    #[inline]
    pub fn removed(self, p: Pip) -> PipSet {
        PipSet(self.0 & !(1 << p))
    }

    /// Pips from which a `d`-pip advance lands inside `self`.
    #[inline]
    pub fn reach(self, d: Die) -> PipSet {
        PipSet(self.0 >> d)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl BitAnd for PipSet {
    type Output = PipSet;
    #[inline]
    fn bitand(self, rhs: PipSet) -> PipSet {
        PipSet(self.0 & rhs.0)
    }
}

impl BitOr for PipSet {
    type Output = PipSet;
    #[inline]
    fn bitor(self, rhs: PipSet) -> PipSet {
        PipSet(self.0 | rhs.0)
    }
}

impl Iterator for PipSet {
    type Item = Pip;

    #[inline]
    fn next(&mut self) -> Option<Pip> {
        if self.0 == 0 {
            return None;
        }
        let p = self.lowest();
        *self = self.without_lowest();
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_first_iteration() {
        let s = PipSet::bit(3) | PipSet::bit(17) | PipSet::bit(24);
        let pips: Vec<Pip> = s.collect();
        assert_eq!(pips, vec![3, 17, 24]);
    }

    #[test]
    fn reach_models_die_advance() {
        // 19 is reachable with a 4 from 15, with a 6 from 13.
        let avail = PipSet::bit(19);
        assert!(avail.reach(4).contains(15));
        assert!(avail.reach(6).contains(13));
        assert!(!avail.reach(4).contains(14));
    }

    #[test]
    fn set_algebra() {
        let a = PipSet::bit(1) | PipSet::bit(2);
        assert_eq!(a.removed(1), PipSet::bit(2));
        assert_eq!(a.inserted(5).len(), 3);
        assert_eq!((a & PipSet::bit(2)).lowest(), 2);
        assert!(a.without_lowest().without_lowest().is_empty());
    }
}
