//! Exact win probabilities for mutual bare-off races.
//!
//! `p[mover][opp]` is the probability that the player to move wins, for
//! all configuration pairs below a checker-count ceiling. Terminals:
//! `p[0][*] = 1` (mover already off), `p[*][0] = 0` (opponent already
//! off). Everything else follows the minimax recursion
//!
//! `p[w][b] = 1 - sum over rolls of P(roll) * min over moves p[b][w']`
//!
//! where the mover picks the move that leaves the opponent the worst
//! position to be in. A transition changes both coordinates' roles, so
//! the fill order is by increasing hash sum `w + b` — a genuine diagonal
//! DAG traversal, not a nested loop. Every legal move strictly lowers the
//! mover's hash, so each diagonal depends only on completed ones; entries
//! within a diagonal are independent and computed in parallel.

use std::time::Instant;

use rayon::prelude::*;

use crate::board::{Board, BoardInfo};
use crate::constants::N_EXACT;
use crate::hashing::{Hash, HashEngine};
use crate::movegen::{generate_moves, MoveSink};
use crate::rolls::ROLLS21;
use crate::tables::TableValues;

pub struct ExactTable {
    /// Hash ceiling: valid for pairs with both hashes below it.
    ceiling: usize,
    /// Row-major `ceiling * ceiling` values, `[mover][opp]`.
    values: TableValues,
}

/// Minimum of `p[opp][w']` over the boards pushed.
struct MinExact<'a> {
    engine: &'a HashEngine,
    values: &'a [f32],
    ceiling: usize,
    opp: usize,
    min: f32,
}

impl MoveSink for MinExact<'_> {
    fn push_board(&mut self, b: &Board) {
        let w = self.engine.board_hash(b) as usize;
        debug_assert!(w < self.ceiling);
        let v = self.values[self.opp * self.ceiling + w];
        self.min = self.min.min(v);
    }
}

fn win_probability(
    engine: &HashEngine,
    values: &[f32],
    ceiling: usize,
    opp: usize,
    bi: &mut BoardInfo,
) -> f32 {
    let mut p = 0.0f64;
    for r in &ROLLS21 {
        let mut sink = MinExact {
            engine,
            values,
            ceiling,
            opp,
            min: f32::INFINITY,
        };
        generate_moves(bi, r, &mut sink);
        p += r.p as f64 * sink.min as f64;
    }
    1.0 - p as f32
}

impl ExactTable {
    /// Build the canonical table: every pair with at most 7 unfinished
    /// checkers on each side.
    pub fn compute(engine: &HashEngine) -> ExactTable {
        ExactTable::compute_sized(engine, N_EXACT)
    }

    /// Build a table with an arbitrary hash ceiling. Small ceilings make
    /// quick tables for tests; the ceiling should be a `multichoose(7, k)`
    /// value so it corresponds to a checker-count cutoff.
    pub fn compute_sized(engine: &HashEngine, ceiling: usize) -> ExactTable {
        let start = Instant::now();
        println!("Computing exact win table, ceiling {ceiling} ({} pairs)...", ceiling * ceiling);

        let mut values = vec![0.0f32; ceiling * ceiling];
        values[0] = 1.0;
        for i in 1..ceiling {
            values[i] = 1.0; // finished mover has already won
            values[i * ceiling] = 0.0; // finished opponent has already lost
        }

        // Diagonal by diagonal: all pairs with w + b == s, both nonzero.
        for s in 2..=2 * (ceiling - 1) {
            let w_lo = 1.max(s as i64 - (ceiling as i64 - 1)) as usize;
            let w_hi = (ceiling - 1).min(s - 1);
            let row: Vec<(usize, f32)> = (w_lo..=w_hi)
                .into_par_iter()
                .map(|w| {
                    let b = s - w;
                    let mut bi = BoardInfo::from_inner(&engine.inverse_hash(w as Hash));
                    (w, win_probability(engine, &values, ceiling, b, &mut bi))
                })
                .collect();
            for (w, p) in row {
                values[w * ceiling + (s - w)] = p;
            }
        }

        println!(
            "Exact win table done in {:.2}s",
            start.elapsed().as_secs_f64()
        );
        ExactTable {
            ceiling,
            values: TableValues::Owned(values),
        }
    }

    pub fn from_values(ceiling: usize, values: TableValues) -> ExactTable {
        debug_assert_eq!(values.as_slice().len(), ceiling * ceiling);
        ExactTable { ceiling, values }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Unchecked lookup; both hashes must be below the ceiling.
    #[inline]
    pub fn get(&self, mover: Hash, opp: Hash) -> f32 {
        self.values.as_slice()[mover as usize * self.ceiling + opp as usize]
    }

    pub fn values(&self) -> &[f32] {
        self.values.as_slice()
    }
}
