//! Legal-move generation.
//!
//! Generation branches on three cases: checkers on the bar, doubles, and
//! two distinct dice. All exploration happens in place on one board with
//! paired mutate/undo, and every completed position is handed to a
//! [`MoveSink`] — never collected into a list. Sequences reachable two
//! ways (both orders of the dice through the same pips) are emitted
//! exactly once; the suppression conditions are rule-derived and must not
//! be loosened.
//!
//! Availability sets passed through the backtracking search are
//! reach-shifted: a set contains pip `p` when `p + d` is a legal landing
//! for the die `d` in play.

use crate::board::{Board, BoardInfo, Info};
use crate::constants::{BAR, FINISH};
use crate::pips::{Die, Pip, PipSet};
use crate::rolls::Roll;

/// Consumer of completed positions. Called once per distinct legal
/// resulting board; the reference is valid only for the duration of the
/// call (the board is about to be undone).
pub trait MoveSink {
    fn push_board(&mut self, b: &Board);
}

/// Collects every emitted board. Handy for consumers that genuinely need
/// the full move list (and for tests).
#[derive(Default)]
pub struct BoardVec(pub Vec<Board>);

impl MoveSink for BoardVec {
    fn push_board(&mut self, b: &Board) {
        self.0.push(b.clone());
    }
}

/// Generate all distinct legal resulting boards for `bi` and `roll`.
pub fn generate_moves<S: MoveSink>(bi: &mut BoardInfo, roll: &Roll, sink: &mut S) {
    let info = bi.info;
    bi.board.gen_moves(sink, info, roll.hi, roll.lo);
}

#[inline]
fn crossover(from: Pip, to: Pip) -> i32 {
    (from < 19 && to >= 19) as i32
}

impl Board {
    pub fn gen_moves<S: MoveSink>(&mut self, sink: &mut S, info: Info, hi: Die, lo: Die) {
        if self.bar() > 0 {
            self.gen_from_bar(sink, info, hi, lo);
        } else if hi == lo {
            self.gen_doubles(sink, info.occ, info.avail, hi, info.outside, 4);
        } else {
            self.gen_hi_lo(sink, info, hi, lo);
        }
    }

    fn push<S: MoveSink>(&self, sink: &mut S) {
        sink.push_board(self);
    }

    /// Play `from` → `to` and emit the resulting board.
    fn enque_move<S: MoveSink>(&mut self, sink: &mut S, from: Pip, to: Pip) {
        let hit = self.move_checker(from, to);
        self.push(sink);
        self.undo_move(from, to, hit);
    }

    /// One move of die `d` from each pip in `w`, each emitted.
    fn gen_one<S: MoveSink>(&mut self, sink: &mut S, w: PipSet, d: Die) {
        for from in w {
            self.enque_move(sink, from, from + d);
        }
    }

    /// Clamp an off-board landing to the finished slot when bearing off
    /// from `f` is legal: all checkers home, and an overshooting die only
    /// from the backmost occupied home pip.
    fn bear_off_target(&self, f: Pip, to: Pip, outside: i32) -> Option<Pip> {
        debug_assert!(to >= FINISH);
        if outside != 0 {
            return None;
        }
        if to == FINISH || self.backmost(f) {
            Some(FINISH)
        } else {
            None
        }
    }

    /// Whether the hi-first order of a hi/lo pair from one checker ends on
    /// the same board as the lo-first order, making the lo-first
    /// continuation a duplicate. Called with the lo move already played:
    /// the checker sits on `to_lo` and would continue to `to_lo + hi`.
    fn hi_first_reaches(&self, to_hi: Pip, to_lo: Pip, hi: Die) -> bool {
        if to_hi == FINISH {
            // The high die alone bears the checker off, so the swapped
            // order pairs it with a different checker. The exception is
            // the last one, where both orders just end the game.
            return self.finished() == 14;
        }
        if to_lo + hi <= FINISH {
            // An on-board or exact bear-off landing: reachability is the
            // same availability bit in either order.
            return true;
        }
        // Overshoot bear-off from to_lo. The hi-first twin bears off from
        // to_hi instead, which is legal only with nothing behind to_hi
        // besides this very checker.
        self.points[to_lo] == 1 && (19..to_hi).all(|p| p == to_lo || self.points[p] <= 0)
    }

    /// Backtracking search: play exactly `n` moves of die `d` from the
    /// pips in `occ`, emitting every completed sequence. `avail` is the
    /// reach-shifted availability set. Newly landed checkers re-enter the
    /// search when their next hop is itself available. Returns whether at
    /// least one full sequence was emitted when the maximum feasible
    /// checker count is taken from the lowest pip first; once any prefix
    /// count fails, smaller counts from the same pip are dead too.
    fn gen_n<S: MoveSink>(
        &mut self,
        sink: &mut S,
        occ: PipSet,
        avail: PipSet,
        d: Die,
        outside: i32,
        n: i32,
    ) -> bool {
        if n == 0 {
            self.push(sink);
            return true;
        }
        if occ.is_empty() {
            // Game over absorbs the remaining dice.
            if self.finished() == 15 {
                self.push(sink);
                return true;
            }
            return false;
        }

        let from = occ.lowest();
        let rest = occ.without_lowest();
        if !avail.contains(from) {
            return self.gen_n(sink, rest, avail, d, outside, n);
        }

        let to = from + d;
        let cnt = n.min(self.points[from] as i32);

        if to > 24 {
            if outside != 0 {
                return false;
            }
            if to > FINISH && !self.backmost(from) {
                return false;
            }
            for _ in 0..cnt {
                self.bear_off(from);
            }
            let ret = self.gen_n(sink, rest, avail, d, 0, n - cnt);
            for _ in 0..cnt {
                self.undo_bear_off(from);
            }
            return ret;
        }

        // A landed checker can move again when its next hop is available.
        let occ_n = rest | (PipSet::bit(to) & avail);

        let hit = self.move_checker(from, to);
        for _ in 1..cnt {
            self.move_checker(from, to);
        }
        let moved_in = if to > 18 && from <= 18 { cnt } else { 0 };

        // Max count from this pip first, then cnt-1 .. 1, then zero.
        let ret = self.gen_n(sink, occ_n, avail, d, outside - moved_in, n - cnt);
        let mut more = ret;
        for c in (1..cnt).rev() {
            self.undo_move(from, to, false);
            if more {
                let oi = if moved_in != 0 { c } else { 0 };
                more = self.gen_n(sink, occ_n, avail, d, outside - oi, n - c);
            }
        }
        self.undo_move(from, to, hit);
        if more {
            self.gen_n(sink, rest, avail, d, outside, n);
        }
        ret
    }

    /// Doubles: play the largest feasible number of moves, trying `n`
    /// before `n - 1` and so on. `gen_n` with `n == 0` emits the null
    /// move, so this always terminates with at least one emission.
    fn gen_doubles<S: MoveSink>(
        &mut self,
        sink: &mut S,
        occ: PipSet,
        avail: PipSet,
        d: Die,
        outside: i32,
        n: i32,
    ) {
        let reach = avail.reach(d);
        let mut n = n;
        while !self.gen_n(sink, occ, reach, d, outside, n) {
            debug_assert!(n > 0);
            n -= 1;
        }
    }

    /// Distinct dice, both playable in some order from some pips.
    /// Iterates occupied pips low to high; for each pip `f`, the high die
    /// from `f` is completed by the low die from `f`'s landing or any
    /// later pip, and vice versa. The swapped order through the same two
    /// landings is suppressed by removing the low landing from the high
    /// die's availability, but only when the orders truly collapse to one
    /// board: a capture on either landing, or a bear-off the swapped
    /// order cannot mirror, keeps both.
    fn gen_hl<S: MoveSink>(
        &mut self,
        sink: &mut S,
        occ: PipSet,
        a_hi: PipSet,
        a_lo: PipSet,
        hi: Die,
        lo: Die,
        outside: i32,
    ) -> bool {
        debug_assert!(self.finished() < 15);

        let mut ret = false;
        let mut occ = occ;
        while !occ.is_empty() {
            let f = occ.lowest();
            occ = occ.without_lowest();

            let mut to_hi = f + hi;
            let mut move_hi = a_hi.contains(f);
            if move_hi && to_hi > 24 {
                match self.bear_off_target(f, to_hi, outside) {
                    Some(t) => to_hi = t,
                    None => move_hi = false,
                }
            }
            let mut to_lo = f + lo;
            let mut move_lo = a_lo.contains(f);
            if move_lo && to_lo > 24 {
                match self.bear_off_target(f, to_lo, outside) {
                    Some(t) => to_lo = t,
                    None => move_lo = false,
                }
            }

            if move_hi {
                let hit_hi = self.move_checker(f, to_hi);
                if move_lo && self.points[f] > 0 {
                    // Both dice from f, two different checkers.
                    self.enque_move(sink, f, to_lo);
                    ret = true;
                }
                ret |= self.gen_n(
                    sink,
                    occ.inserted(to_hi),
                    a_lo,
                    lo,
                    outside - crossover(f, to_hi),
                    1,
                );
                self.undo_move(f, to_hi, hit_hi);
            }
            if move_lo && to_hi != to_lo {
                let hit_lo = self.move_checker(f, to_lo);
                // f/f+lo/f+lo+hi duplicates f/f+hi/f+hi+lo only when the
                // swapped order reaches the same board: neither landing
                // captures, and the hi-first continuation is itself legal.
                let quiet = move_hi && !(hit_lo || self.blot(to_hi));
                let a_hi2 = if quiet && self.hi_first_reaches(to_hi, to_lo, hi) {
                    a_hi.removed(to_lo)
                } else {
                    a_hi
                };
                ret |= self.gen_n(
                    sink,
                    occ.inserted(to_lo),
                    a_hi2,
                    hi,
                    outside - crossover(f, to_lo),
                    1,
                );
                self.undo_move(f, to_lo, hit_lo);
            }
        }
        ret
    }

    fn gen_hi_lo<S: MoveSink>(&mut self, sink: &mut S, info: Info, hi: Die, lo: Die) {
        let played_both = self.gen_hl(
            sink,
            info.occ,
            info.avail.reach(hi),
            info.avail.reach(lo),
            hi,
            lo,
            info.outside,
        );
        if !played_both {
            // Only one die plays: emit the single-die alternatives.
            let play_hi = self.gen_n(sink, info.occ, info.avail.reach(hi), hi, info.outside, 1);
            let play_lo = self.gen_n(sink, info.occ, info.avail.reach(lo), lo, info.outside, 1);
            if !(play_hi || play_lo) {
                self.push(sink); // null move
            }
        }
    }

    /// Entry from the bar, which must happen before any other move.
    fn gen_from_bar<S: MoveSink>(&mut self, sink: &mut S, info: Info, hi: Die, lo: Die) {
        debug_assert!(self.bar() > 0);
        let to_hi: Pip = hi;
        let to_lo: Pip = lo;
        let a_hi = info.avail.contains(to_hi);
        let a_lo = info.avail.contains(to_lo);
        if !(a_hi || a_lo) {
            self.push(sink); // null move
            return;
        }

        if hi == lo {
            // Enter up to four checkers, then spend the remaining moves.
            let entries = 4.min(self.bar() as i32);
            let hit = self.move_checker(BAR, to_hi); // only the first can hit
            for _ in 1..entries {
                self.move_checker(BAR, to_hi);
            }
            self.gen_doubles(
                sink,
                info.occ.inserted(to_hi),
                info.avail,
                hi,
                info.outside,
                4 - entries,
            );
            for _ in 1..entries {
                self.undo_move(BAR, to_hi, false);
            }
            self.undo_move(BAR, to_hi, hit);
            return;
        }

        if self.bar() > 1 {
            // The only play is entering with both dice (or whichever is
            // open); the remaining bar checkers stay put.
            let mut hit_hi = false;
            let mut hit_lo = false;
            if a_hi {
                hit_hi = self.move_checker(BAR, to_hi);
            }
            if a_lo {
                hit_lo = self.move_checker(BAR, to_lo);
            }
            self.push(sink);
            if a_lo {
                self.undo_move(BAR, to_lo, hit_lo);
            }
            if a_hi {
                self.undo_move(BAR, to_hi, hit_hi);
            }
            return;
        }

        // Exactly one checker on the bar: enter with one die, complete
        // with the other from any reachable pip (including the entry pip).
        let mut both_taken = false;
        let mut suppress_entry = false;
        if a_hi {
            let w_lo = info.occ.inserted(to_hi) & info.avail.reach(lo);
            if !w_lo.is_empty() {
                let hit_hi = self.move_checker(BAR, to_hi);
                self.gen_one(sink, w_lo, lo);
                self.undo_move(BAR, to_hi, hit_hi);
                both_taken = true;
                // bar/hi/hi+lo was just emitted; don't also emit
                // bar/lo/hi+lo unless one of the landings captures.
                suppress_entry =
                    info.avail.contains(hi + lo) && self.points[to_lo] >= 0 && !hit_hi;
            }
        }
        if a_lo {
            let entry = if suppress_entry {
                PipSet::EMPTY
            } else {
                PipSet::bit(to_lo)
            };
            let w_hi = (info.occ | entry) & info.avail.reach(hi);
            if !w_hi.is_empty() {
                let hit_lo = self.move_checker(BAR, to_lo);
                self.gen_one(sink, w_hi, hi);
                self.undo_move(BAR, to_lo, hit_lo);
                both_taken = true;
            }
        }

        if !both_taken {
            if a_hi {
                let hit_hi = self.move_checker(BAR, to_hi);
                self.push(sink);
                self.undo_move(BAR, to_hi, hit_hi);
            }
            if a_lo {
                let hit_lo = self.move_checker(BAR, to_lo);
                self.push(sink);
                self.undo_move(BAR, to_lo, hit_lo);
            }
        }
    }
}
