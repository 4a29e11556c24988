//! Rolls-to-bear-off distributions (PNR) and the race approximation.
//!
//! For each configuration the density of X = "rolls needed to bear off
//! under the minimum-ENR policy" is built bottom-up: mix the best
//! successor's density for each roll, weighted by the roll probability,
//! then shift by one to count the roll just taken. Densities are converted
//! in place to CDFs once the table is complete.

use std::time::Instant;

use crate::board::BoardInfo;
use crate::config_iter::ConfigIter;
use crate::constants::N_CONFIGS;
use crate::enr::{EnrTable, MinEnrHash};
use crate::hashing::{Hash, HashEngine};
use crate::movegen::generate_moves;
use crate::rolls::ROLLS21;

/// Finite-support vector over "rolls remaining", stored from `offset`.
#[derive(Clone, Debug)]
pub struct RollDist {
    support: Vec<f32>,
    offset: usize,
}

impl RollDist {
    fn with_bounds(upper: usize, lower: usize) -> RollDist {
        RollDist {
            support: vec![0.0; upper - lower],
            offset: lower,
        }
    }

    fn point(p: f32) -> RollDist {
        RollDist {
            support: vec![p],
            offset: 0,
        }
    }

    /// First index with support.
    pub fn lower(&self) -> usize {
        self.offset
    }

    /// One past the last index with support.
    pub fn upper(&self) -> usize {
        self.offset + self.support.len()
    }

    #[inline]
    fn get(&self, i: usize) -> f32 {
        self.support[i - self.offset]
    }

    /// CDF value at `i`, extended to the whole axis: 0 below the support,
    /// 1 at and above its upper bound.
    pub fn at(&self, i: isize) -> f32 {
        if i < self.lower() as isize {
            0.0
        } else if i >= self.upper() as isize {
            1.0
        } else {
            self.get(i as usize)
        }
    }

    /// Shift the domain up by one roll.
    fn shift(&mut self) {
        self.offset += 1;
    }

    /// Convert a density to a CDF in place. The running sum must reach 1
    /// within 1e-6; the last entry is pinned to exactly 1.0 so the CDF
    /// terminates cleanly.
    fn to_distribution(&mut self) {
        let mut d = 0.0f64;
        for v in self.support.iter_mut() {
            d += *v as f64;
            *v = d as f32;
        }
        debug_assert!((d - 1.0).abs() < 1.0e-6, "density sums to {d}");
        if let Some(last) = self.support.last_mut() {
            *last = 1.0;
        }
    }

    #[cfg(test)]
    fn density_sum(&self) -> f64 {
        self.support.iter().map(|&v| v as f64).sum()
    }
}

/// Per-configuration rolls-to-bear-off CDFs.
pub struct PnrTable {
    dists: Vec<RollDist>,
}

impl PnrTable {
    pub fn compute(engine: &HashEngine, enr: &EnrTable) -> PnrTable {
        let start = Instant::now();
        println!("Computing PNR distributions for {} configurations...", N_CONFIGS);
        let table = PnrTable::compute_prefix(engine, enr, N_CONFIGS);
        println!("PNR table done in {:.2}s", start.elapsed().as_secs_f64());
        table
    }

    /// Build the first `limit` entries and convert them to CDFs.
    pub fn compute_prefix(engine: &HashEngine, enr: &EnrTable, limit: usize) -> PnrTable {
        assert!(limit <= enr.len());
        let mut dists: Vec<RollDist> = Vec::with_capacity(limit);
        dists.push(RollDist::point(1.0)); // P(X = 0) = 1 when finished
        let mut it = ConfigIter::new();
        while dists.len() < limit && it.advance() {
            let mut bi = BoardInfo::from_inner(it.config());
            let den = density(engine, enr, &dists, &mut bi);
            dists.push(den);
        }
        for d in dists.iter_mut() {
            d.to_distribution();
        }
        PnrTable { dists }
    }

    pub fn len(&self) -> usize {
        self.dists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }

    pub fn dist(&self, h: Hash) -> &RollDist {
        &self.dists[h as usize]
    }

    /// P(mover wins the race), from the two sides' CDFs: the mover wins
    /// when it needs no more rolls than the opponent (ties go to the
    /// mover, who rolls first).
    pub fn pwin_approx(&self, mover: Hash, opp: Hash) -> f32 {
        let xw = self.dist(mover);
        let xb = self.dist(opp);

        let lower = xw.lower().max(xb.lower());
        let upper = xw.upper().min(xb.upper());

        let mut db = xb.at(lower as isize - 1);
        let mut pwin = 0.0f32;
        for i in lower..upper {
            pwin += (xb.get(i) - db) * xw.get(i);
            db = xb.get(i);
        }
        pwin + (1.0 - db)
    }
}

/// Density for one configuration: pick the minimum-ENR move for each roll,
/// mix the successors' densities, then count the roll just taken.
fn density(
    engine: &HashEngine,
    enr: &EnrTable,
    dists: &[RollDist],
    bi: &mut BoardInfo,
) -> RollDist {
    let mut best: [Hash; 21] = [0; 21];
    let mut lo = usize::MAX;
    let mut hi = 0usize;
    for r in &ROLLS21 {
        let mut sink = MinEnrHash::new(engine, enr);
        generate_moves(bi, r, &mut sink);
        best[r.ordinal] = sink.hash;
        let den = &dists[sink.hash as usize];
        lo = lo.min(den.lower());
        hi = hi.max(den.upper());
    }

    let mut out = RollDist::with_bounds(hi, lo);
    for r in &ROLLS21 {
        let den = &dists[best[r.ordinal] as usize];
        let base = den.lower() - out.lower();
        for (j, &d) in den.support.iter().enumerate() {
            out.support[base + j] += r.p * d;
        }
    }
    out.shift();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> (HashEngine, PnrTable) {
        let engine = HashEngine::new();
        let enr = EnrTable::compute_prefix(&engine, 210);
        let pnr = PnrTable::compute_prefix(&engine, &enr, 210);
        (engine, pnr)
    }

    #[test]
    fn densities_normalize() {
        let engine = HashEngine::new();
        let enr = EnrTable::compute_prefix(&engine, 210);
        // Before CDF conversion every density must sum to 1.
        let mut dists: Vec<RollDist> = vec![RollDist::point(1.0)];
        let mut it = ConfigIter::new();
        while dists.len() < 210 && it.advance() {
            let mut bi = BoardInfo::from_inner(it.config());
            let den = density(&engine, &enr, &dists, &mut bi);
            assert!(
                (den.density_sum() - 1.0).abs() < 1e-6,
                "hash {} sums to {}",
                it.hash(),
                den.density_sum()
            );
            dists.push(den);
        }
    }

    #[test]
    fn cdfs_terminate_at_one() {
        let (_, pnr) = small_table();
        for h in 0..pnr.len() {
            let d = pnr.dist(h as Hash);
            assert_eq!(d.at(d.upper() as isize - 1), 1.0);
            assert_eq!(d.at(d.lower() as isize - 1), 0.0);
        }
    }

    #[test]
    fn single_checker_support() {
        let (_, pnr) = small_table();
        // One checker 1 pip out always needs exactly one roll.
        let d = pnr.dist(1);
        assert_eq!((d.lower(), d.upper()), (1, 2));
        assert_eq!(d.at(1), 1.0);
    }

    #[test]
    fn pwin_approx_terminals() {
        let (_, pnr) = small_table();
        for h in 1..50 {
            assert!((pnr.pwin_approx(0, h) - 1.0).abs() < 1e-6);
            assert!(pnr.pwin_approx(h, 0).abs() < 1e-6);
        }
    }

    #[test]
    fn pwin_approx_is_a_probability() {
        let (_, pnr) = small_table();
        for a in [1, 7, 83, 150, 209] {
            for b in [1, 7, 83, 150, 209] {
                let p = pnr.pwin_approx(a, b);
                assert!((0.0..=1.0).contains(&p), "pwin({a},{b}) = {p}");
            }
        }
    }

    #[test]
    fn certain_winner_beats_slow_racer() {
        let (_, pnr) = small_table();
        // One checker 1 pip out vs four checkers deep in the board.
        assert!(pnr.pwin_approx(1, 209) > 0.99);
        assert!(pnr.pwin_approx(209, 1) < 0.5);
    }
}
