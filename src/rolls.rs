//! The 21 distinct dice rolls with their exact probabilities.
//!
//! Non-double rolls occur two ways and carry probability 2/36; doubles 1/36.
//! The table is ordered by descending playing strength; `ordinal` is the
//! roll's stable index into per-roll scratch arrays.

use crate::pips::Die;

#[derive(Clone, Copy, Debug)]
pub struct Roll {
    pub hi: Die,
    pub lo: Die,
    pub ordinal: usize,
    pub p: f32,
}

impl Roll {
    pub fn is_double(&self) -> bool {
        self.hi == self.lo
    }
}

const D: f32 = 1.0 / 36.0; // a double
const N: f32 = 2.0 / 36.0; // a non-double, counted both ways

pub const ROLLS21: [Roll; 21] = [
    Roll { hi: 6, lo: 6, ordinal: 0, p: D },
    Roll { hi: 5, lo: 5, ordinal: 1, p: D },
    Roll { hi: 4, lo: 4, ordinal: 2, p: D },
    Roll { hi: 3, lo: 3, ordinal: 3, p: D },
    Roll { hi: 6, lo: 5, ordinal: 4, p: N },
    Roll { hi: 6, lo: 4, ordinal: 5, p: N },
    Roll { hi: 5, lo: 4, ordinal: 6, p: N },
    Roll { hi: 6, lo: 3, ordinal: 7, p: N },
    Roll { hi: 2, lo: 2, ordinal: 8, p: D },
    Roll { hi: 5, lo: 3, ordinal: 9, p: N },
    Roll { hi: 6, lo: 2, ordinal: 10, p: N },
    Roll { hi: 4, lo: 3, ordinal: 11, p: N },
    Roll { hi: 5, lo: 2, ordinal: 12, p: N },
    Roll { hi: 6, lo: 1, ordinal: 13, p: N },
    Roll { hi: 4, lo: 2, ordinal: 14, p: N },
    Roll { hi: 5, lo: 1, ordinal: 15, p: N },
    Roll { hi: 3, lo: 2, ordinal: 16, p: N },
    Roll { hi: 4, lo: 1, ordinal: 17, p: N },
    Roll { hi: 1, lo: 1, ordinal: 18, p: D },
    Roll { hi: 3, lo: 1, ordinal: 19, p: N },
    Roll { hi: 2, lo: 1, ordinal: 20, p: N },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probabilities_sum_to_one() {
        // The f32 roundings of 1/36 and 2/36 land within f32 precision of
        // an exact total, not f64 precision.
        let sum: f64 = ROLLS21.iter().map(|r| r.p as f64).sum();
        assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
    }

    #[test]
    fn ordinals_match_positions() {
        for (i, r) in ROLLS21.iter().enumerate() {
            assert_eq!(r.ordinal, i);
            assert!(r.hi >= r.lo && (1..=6).contains(&r.hi) && (1..=6).contains(&r.lo));
            assert_eq!(r.p, if r.is_double() { D } else { N });
        }
    }

    #[test]
    fn all_pairs_present_once() {
        let mut seen = [[false; 7]; 7];
        for r in &ROLLS21 {
            assert!(!seen[r.hi][r.lo]);
            seen[r.hi][r.lo] = true;
        }
    }
}
