//! Expected number of rolls to bear off, for every configuration.
//!
//! ENR(0) = 0. For every other hash, in ascending order:
//! `ENR(c) = sum over rolls of P(roll) * (1 + ENR(best successor))`, the
//! best successor being the minimum-ENR board the generator can reach.
//! Ascending hash order is a valid topological order because every legal
//! bare-off move strictly decreases the mover's hash.

use std::time::Instant;

use crate::board::{Board, BoardInfo};
use crate::config_iter::ConfigIter;
use crate::constants::N_CONFIGS;
use crate::hashing::{Hash, HashEngine};
use crate::movegen::{generate_moves, MoveSink};
use crate::rolls::ROLLS21;
use crate::tables::TableValues;

pub struct EnrTable {
    values: TableValues,
}

/// Minimum table value over the boards pushed.
struct MinEnr<'a> {
    engine: &'a HashEngine,
    values: &'a [f32],
    min: f32,
}

impl MoveSink for MinEnr<'_> {
    fn push_board(&mut self, b: &Board) {
        let h = self.engine.board_hash(b) as usize;
        self.min = self.min.min(self.values[h]);
    }
}

/// Hash of the minimum-ENR board pushed. First minimum wins ties, which
/// pins the best-move choice the PNR densities are built from.
pub(crate) struct MinEnrHash<'a> {
    engine: &'a HashEngine,
    values: &'a [f32],
    min: f32,
    pub hash: Hash,
}

impl<'a> MinEnrHash<'a> {
    pub fn new(engine: &'a HashEngine, enr: &'a EnrTable) -> MinEnrHash<'a> {
        MinEnrHash {
            engine,
            values: enr.values.as_slice(),
            min: f32::INFINITY,
            hash: 0,
        }
    }
}

impl MoveSink for MinEnrHash<'_> {
    fn push_board(&mut self, b: &Board) {
        let h = self.engine.board_hash(b);
        let v = self.values[h as usize];
        if self.min > v {
            self.min = v;
            self.hash = h;
        }
    }
}

fn expected_rolls(engine: &HashEngine, values: &[f32], bi: &mut BoardInfo) -> f32 {
    let mut e = 0.0f64;
    for r in &ROLLS21 {
        let mut best = MinEnr {
            engine,
            values,
            min: f32::INFINITY,
        };
        generate_moves(bi, r, &mut best);
        e += r.p as f64 * (1.0 + best.min as f64);
    }
    e as f32
}

impl EnrTable {
    /// Build the full table with progress reporting.
    pub fn compute(engine: &HashEngine) -> EnrTable {
        let start = Instant::now();
        println!("Computing ENR for {} configurations...", N_CONFIGS);
        let table = EnrTable::compute_prefix(engine, N_CONFIGS);
        println!(
            "ENR table done in {:.2}s",
            start.elapsed().as_secs_f64()
        );
        table
    }

    /// Build the first `limit` entries. A prefix is self-contained: every
    /// successor of hash h has a hash below h.
    pub fn compute_prefix(engine: &HashEngine, limit: usize) -> EnrTable {
        let mut values: Vec<f32> = Vec::with_capacity(limit);
        values.push(0.0); // all finished
        let mut it = ConfigIter::new();
        while values.len() < limit && it.advance() {
            let mut bi = BoardInfo::from_inner(it.config());
            let e = expected_rolls(engine, &values, &mut bi);
            values.push(e);
        }
        EnrTable {
            values: TableValues::Owned(values),
        }
    }

    pub fn from_values(values: TableValues) -> EnrTable {
        EnrTable { values }
    }

    #[inline]
    pub fn get(&self, h: Hash) -> f32 {
        self.values.as_slice()[h as usize]
    }

    pub fn len(&self) -> usize {
        self.values.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> &[f32] {
        self.values.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_checker_values() {
        let engine = HashEngine::new();
        // Hashes 1..=6 are the single-unfinished-checker configurations.
        let enr = EnrTable::compute_prefix(&engine, 7);
        assert_eq!(enr.get(0), 0.0);
        // One checker 1..3 pips out always bears off this roll.
        for h in 1..=3 {
            assert!((enr.get(h) - 1.0).abs() < 1e-6, "ENR({h}) = {}", enr.get(h));
        }
        // 4 pips out: only 2-1 fails to finish (best successor then bears
        // off for sure).
        assert!((enr.get(4) - (1.0 + 2.0 / 36.0)).abs() < 1e-6);
        // 5 pips out: 2-1, 3-1 and 1-1 fail.
        assert!((enr.get(5) - (1.0 + 5.0 / 36.0)).abs() < 1e-6);
        // 6 pips out: 2-1, 3-1, 3-2, 4-1 and 1-1 fail.
        assert!((enr.get(6) - (1.0 + 9.0 / 36.0)).abs() < 1e-6);
    }

    #[test]
    fn enr_positive_and_bounded_on_a_prefix() {
        let engine = HashEngine::new();
        let enr = EnrTable::compute_prefix(&engine, 210);
        for h in 1..210 {
            let v = enr.get(h as Hash);
            // Any 4-checker race ends well inside 15 rolls.
            assert!(v >= 1.0 && v < 15.0, "ENR({h}) = {v}");
        }
    }

    #[test]
    fn enr_weakly_decreases_along_moves() {
        let engine = HashEngine::new();
        let enr = EnrTable::compute_prefix(&engine, 210);
        // Moving a checker closer to off never increases ENR.
        let near = engine.position_hash(&[12, 1, 1, 1, 0, 0, 0]);
        let far = engine.position_hash(&[12, 0, 1, 1, 1, 0, 0]);
        assert!(enr.get(near) <= enr.get(far));
    }
}
