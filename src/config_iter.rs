//! Incremental enumeration of inner-table configurations in hash order.
//!
//! Advancing is O(1) amortized: a stack of currently-nonzero coordinate
//! indices tracks the odometer frontier, and each step moves one checker
//! from the frontier coordinate to the next, cascading a carry when a
//! coordinate empties. The sequence is exactly `inverse_hash(0)`,
//! `inverse_hash(1)`, ... without the recomputation.

use crate::board::InnerConfig;
use crate::constants::{CHECKERS_PER_SIDE, N_CLASSES, N_CONFIGS};
use crate::hashing::{Hash, HashEngine};

pub struct ConfigIter {
    hash: Hash,
    stack: Vec<usize>,
    config: InnerConfig,
}

impl ConfigIter {
    /// Start at hash 0: all checkers finished.
    pub fn new() -> ConfigIter {
        let mut config: InnerConfig = [0; N_CLASSES];
        config[0] = CHECKERS_PER_SIDE;
        ConfigIter {
            hash: 0,
            stack: vec![0],
            config,
        }
    }

    /// Start at an arbitrary hash: one inverse-hash lookup plus the same
    /// stack bootstrap. Used for partial and parallel enumeration.
    pub fn starting_at(engine: &HashEngine, h: Hash) -> ConfigIter {
        let config = engine.inverse_hash(h);
        let stack = (0..N_CLASSES).filter(|&i| config[i] > 0).collect();
        ConfigIter {
            hash: h,
            stack,
            config,
        }
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn config(&self) -> &InnerConfig {
        &self.config
    }

    pub fn more(&self) -> bool {
        self.hash < N_CONFIGS as Hash - 1
    }

    /// Step to the next hash. Returns false once the sequence is
    /// exhausted, leaving the final configuration in place.
    pub fn advance(&mut self) -> bool {
        if !self.more() {
            return false;
        }
        self.hash += 1;

        let top = self.stack.len() - 1;
        let last = self.stack[top];
        if last < 6 {
            // Move one checker from the frontier coordinate to the next.
            self.config[last + 1] = 1;
            self.config[last] -= 1;
            if self.config[last] > 0 {
                self.stack.push(last + 1);
            } else {
                self.stack[top] = last + 1;
            }
        } else {
            // Coordinate 6 is exhausted: carry its checkers back onto the
            // next checker of the previous nonzero coordinate.
            let c = self.config[6];
            self.config[6] = 0;
            self.stack.pop();
            let top = self.stack.len() - 1;
            let prev = self.stack[top];
            debug_assert!(prev < 6);
            self.config[prev + 1] = c + 1;
            self.config[prev] -= 1;
            if self.config[prev] > 0 {
                self.stack.push(prev + 1);
            } else {
                self.stack[top] = prev + 1;
            }
        }
        true
    }
}

impl Default for ConfigIter {
    fn default() -> ConfigIter {
        ConfigIter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_steps() {
        let mut it = ConfigIter::new();
        assert_eq!(*it.config(), [15, 0, 0, 0, 0, 0, 0]);
        assert!(it.advance());
        assert_eq!(*it.config(), [14, 1, 0, 0, 0, 0, 0]);
        assert!(it.advance());
        assert_eq!(*it.config(), [14, 0, 1, 0, 0, 0, 0]);
        assert_eq!(it.hash(), 2);
    }

    #[test]
    fn matches_inverse_hash_everywhere() {
        let engine = HashEngine::new();
        let mut it = ConfigIter::new();
        let mut count = 1usize;
        while it.advance() {
            count += 1;
            let sum: i32 = it.config().iter().sum();
            assert_eq!(sum, CHECKERS_PER_SIDE);
            assert_eq!(*it.config(), engine.inverse_hash(it.hash()));
        }
        assert_eq!(count, N_CONFIGS);
        assert_eq!(*it.config(), [0, 0, 0, 0, 0, 0, 15]);
        assert!(!it.advance());
    }

    #[test]
    fn arbitrary_start_joins_the_sequence() {
        let engine = HashEngine::new();
        for start in [1, 6, 920, 1716, 12_345, N_CONFIGS as Hash - 2] {
            let mut a = ConfigIter::starting_at(&engine, start);
            let mut b = ConfigIter::new();
            while b.hash() < start {
                assert!(b.advance());
            }
            assert_eq!(a.config(), b.config());
            for _ in 0..30 {
                let more = a.advance();
                assert_eq!(more, b.advance());
                assert_eq!(a.config(), b.config());
                assert_eq!(a.hash(), b.hash());
            }
        }
    }
}
