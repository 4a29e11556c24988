//! Perfect hash over inner-table configurations.
//!
//! A configuration is a 7-coordinate multiset of 15 checkers (finished +
//! home pips 1..6). The hash is a reversed combinatorial rank built from
//! multichoose coefficients: lexicographically smaller configurations get
//! larger hashes, the ordering the incremental iterator and both DP
//! engines depend on. `position_hash` and `inverse_hash` are exact
//! inverses over the whole range [0, 54263].

use crate::board::{Board, InnerConfig};
use crate::constants::{N_CLASSES, N_CONFIGS};

pub type Hash = i64;

/// binom(n, k), exact for the small arguments used here; 0 for k < 0.
pub fn binom(n: i64, k: i64) -> i64 {
    let k = k.min(n - k);
    let mut res: i64 = (k >= 0) as i64;
    for i in 0..k {
        res = res * (n - i) / (i + 1);
    }
    res
}

/// Multisets of size k from n classes.
pub fn multichoose(n: i64, k: i64) -> i64 {
    binom(n + k - 1, k)
}

/// Precomputed multichoose coefficients for n in 1..=7, k in -1..=15,
/// plus the hash/unhash operations built on them.
pub struct HashEngine {
    mc: [[i64; 17]; N_CLASSES],
}

impl HashEngine {
    pub fn new() -> HashEngine {
        let mut mc = [[0i64; 17]; N_CLASSES];
        for (n, row) in mc.iter_mut().enumerate() {
            for (k, v) in row.iter_mut().enumerate() {
                *v = multichoose(n as i64 + 1, k as i64 - 1);
            }
        }
        HashEngine { mc }
    }

    /// multichoose(n, k) for n in 1..=7, k in -1..=15.
    #[inline]
    fn mc(&self, n: usize, k: i64) -> i64 {
        debug_assert!((1..=7).contains(&n) && (-1..=15).contains(&k));
        self.mc[n - 1][(k + 1) as usize]
    }

    /// Number of configurations lexicographically smaller at prefix stage
    /// `i`, given `k_sum` checkers already placed on coordinates < i.
    #[inline]
    fn s(&self, i: usize, k_sum: i64) -> i64 {
        self.mc(N_CLASSES - i, 15 - (k_sum + 1))
    }

    pub fn position_hash(&self, b: &InnerConfig) -> Hash {
        let mut k: i64 = 14;
        let mut hash: Hash = 0;
        for i in 0..6 {
            k -= b[i] as i64;
            hash += self.mc(N_CLASSES - i, k);
        }
        hash
    }

    /// Greedy inverse: at each stage find the smallest coordinate whose
    /// cumulative weight fits the remaining budget.
    pub fn inverse_hash(&self, h: Hash) -> InnerConfig {
        debug_assert!((0..N_CONFIGS as Hash).contains(&h));
        let mut b: InnerConfig = [0; N_CLASSES];
        let mut k_sum: i64 = 0;
        let mut rem = h;
        for i in 0..N_CLASSES {
            let mut k = k_sum;
            loop {
                let delta = rem - self.s(i, k);
                if delta >= 0 {
                    rem = delta;
                    break;
                }
                k += 1;
            }
            b[i] = (k - k_sum) as i32;
            k_sum = k;
        }
        debug_assert_eq!(self.position_hash(&b), h);
        b
    }

    /// Hash of a mover bare-off position read straight off the board's
    /// home pips, avoiding the `InnerConfig` round trip. The board must
    /// have all mover checkers home or finished.
    pub fn board_hash(&self, b: &Board) -> Hash {
        let mut k: i64 = 14;
        let mut hash: Hash = 0;
        for i in 0..6 {
            k -= b.points[25 - i] as i64;
            hash += self.mc(N_CLASSES - i, k);
        }
        hash
    }
}

impl Default for HashEngine {
    fn default() -> HashEngine {
        HashEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardInfo;

    #[test]
    fn binom_small_values() {
        assert_eq!(binom(7, 0), 1);
        assert_eq!(binom(7, 2), 21);
        assert_eq!(binom(21, 15), 54_264);
        assert_eq!(binom(5, -1), 0);
    }

    #[test]
    fn multichoose_values() {
        assert_eq!(multichoose(7, 15), 54_264);
        assert_eq!(multichoose(7, 7), 1_716);
        assert_eq!(multichoose(7, 6), 924);
        assert_eq!(multichoose(7, 0), 1);
        assert_eq!(multichoose(1, 0), 1);
    }

    #[test]
    fn corner_hashes() {
        let eng = HashEngine::new();
        assert_eq!(eng.position_hash(&[15, 0, 0, 0, 0, 0, 0]), 0);
        assert_eq!(
            eng.position_hash(&[0, 0, 0, 0, 0, 0, 15]),
            N_CONFIGS as Hash - 1
        );
        // A single unfinished checker i pips out hashes to i.
        for i in 1..N_CLASSES {
            let mut c: InnerConfig = [0; N_CLASSES];
            c[0] = 14;
            c[i] = 1;
            assert_eq!(eng.position_hash(&c), i as Hash);
        }
    }

    #[test]
    fn reversed_lexicographic_order() {
        let eng = HashEngine::new();
        // [14,1,0,...] > [14,0,1,...] lexicographically, so smaller hash.
        let h_a = eng.position_hash(&[14, 1, 0, 0, 0, 0, 0]);
        let h_b = eng.position_hash(&[14, 0, 1, 0, 0, 0, 0]);
        assert!(h_a < h_b);
    }

    #[test]
    fn board_hash_matches_position_hash() {
        let eng = HashEngine::new();
        let c: InnerConfig = [5, 2, 0, 3, 1, 0, 4];
        let bi = BoardInfo::from_inner(&c);
        assert_eq!(eng.board_hash(&bi.board), eng.position_hash(&c));
    }

    #[test]
    fn checker_count_bounds_the_hash() {
        let eng = HashEngine::new();
        // At most k unfinished checkers <=> hash < multichoose(7, k).
        let c: InnerConfig = [8, 1, 2, 1, 1, 1, 1];
        assert!(eng.position_hash(&c) < multichoose(7, 7));
        let d: InnerConfig = [7, 2, 2, 1, 1, 1, 1];
        assert!(eng.position_hash(&d) >= multichoose(7, 7));
    }
}
