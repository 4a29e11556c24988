//! Mutable board state with paired move/undo primitives.
//!
//! The board is always stored from the mover's perspective: the mover owns
//! positive counts and travels from the bar (slot 0) through pips 1..24 to
//! finished (slot 25); the opponent's checkers are negative, with their bar
//! and finished counts tracked in scalar fields. Perspective is switched by
//! [`BoardInfo::flipped`], which also derives the move-generation context.
//!
//! Every mutation has an exact inverse; generation explores the move tree
//! on a single board by pairing each mutator with its inverse on every
//! path.

use crate::constants::*;
use crate::pips::{Pip, PipSet};

/// Derived move-generation context. Recomputed whenever the board is
/// flipped, never mutated independently.
#[derive(Clone, Copy, Debug)]
pub struct Info {
    /// Pips occupied by one or more mover checkers.
    pub occ: PipSet,
    /// Pips not held by two or more opponent checkers, extended with
    /// bear-off bits when bearing off could become legal this turn.
    pub avail: PipSet,
    /// Mover checkers outside the home board (bar included).
    pub outside: i32,
}

/// Inner-table configuration: coordinate 0 = finished, coordinate i =
/// checkers i pips from off. Coordinates sum to 15.
pub type InnerConfig = [i32; N_CLASSES];

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    /// Slot 0 = mover's bar, 1..24 points, 25 = mover's finished.
    pub points: [i8; 26],
    pub opp_finished: i8,
    pub opp_bar: i8,
    /// Mover's sum of distance-to-finish over all 15 checkers.
    pub pip_count: i16,
    pub opp_pip_count: i16,
}

impl Board {
    /// Standard opening position.
    pub fn new() -> Board {
        Board {
            points: [
                0, // bar
                2, 0, 0, 0, 0, -5, //
                0, -3, 0, 0, 0, 5, //
                -5, 0, 0, 0, 3, 0, //
                5, 0, 0, 0, 0, -2, //
                0, // finished
            ],
            opp_finished: 0,
            opp_bar: 0,
            pip_count: INIT_PIP_COUNT,
            opp_pip_count: INIT_PIP_COUNT,
        }
    }

    #[inline]
    pub fn bar(&self) -> i8 {
        self.points[BAR]
    }

    #[inline]
    pub fn finished(&self) -> i8 {
        self.points[FINISH]
    }

    /// An opponent blot (single capturable checker) on `p`.
    #[inline]
    pub fn blot(&self, p: Pip) -> bool {
        self.points[p] == -1
    }

    /// Move one mover checker `from` → `to`, capturing an opponent blot on
    /// `to` if present. Returns whether a capture happened so the caller
    /// can reverse it exactly. `to == 25` enters the finished slot.
    #[inline]
    pub fn move_checker(&mut self, from: Pip, to: Pip) -> bool {
        debug_assert!(to > from && to <= FINISH);
        self.points[from] -= 1;
        self.pip_count -= (to - from) as i16;
        let hit = self.points[to] < 0;
        if hit {
            debug_assert_eq!(self.points[to], -1);
            self.points[to] = 1;
            self.opp_bar += 1;
            self.opp_pip_count += (FINISH - to) as i16;
        } else {
            self.points[to] += 1;
        }
        hit
    }

    /// Exact inverse of [`Board::move_checker`].
    #[inline]
    pub fn undo_move(&mut self, from: Pip, to: Pip, hit: bool) {
        self.points[from] += 1;
        self.pip_count += (to - from) as i16;
        if hit {
            self.points[to] = -1;
            self.opp_bar -= 1;
            self.opp_pip_count -= (FINISH - to) as i16;
        } else {
            self.points[to] -= 1;
        }
    }

    /// Bear a checker off from home pip `from`. `from == 25` is permitted
    /// and is a no-op on the counts: it consumes a die after the game is
    /// already won.
    #[inline]
    pub fn bear_off(&mut self, from: Pip) {
        debug_assert!(from > 18 && from <= FINISH);
        self.points[FINISH] += 1;
        self.points[from] -= 1;
        self.pip_count -= (FINISH - from) as i16;
    }

    #[inline]
    pub fn undo_bear_off(&mut self, from: Pip) {
        self.points[from] += 1;
        self.points[FINISH] -= 1;
        self.pip_count += (FINISH - from) as i16;
    }

    /// No mover checkers on home pips strictly behind `f`.
    pub fn backmost(&self, f: Pip) -> bool {
        self.points[19..f].iter().all(|&c| c <= 0)
    }

    /// (mover, opponent) total checkers accounted for. Both are 15 at all
    /// times.
    pub fn checker_counts(&self) -> (i32, i32) {
        let mut mover = self.points[BAR] as i32 + self.points[FINISH] as i32;
        let mut opp = self.opp_bar as i32 + self.opp_finished as i32;
        for &c in &self.points[1..25] {
            if c > 0 {
                mover += c as i32;
            } else {
                opp -= c as i32;
            }
        }
        (mover, opp)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

/// A board paired with its derived move-generation context.
#[derive(Clone, Debug)]
pub struct BoardInfo {
    pub board: Board,
    pub info: Info,
}

impl BoardInfo {
    /// Flip `b` to the opponent's perspective and derive its `Info`.
    pub fn flipped(b: &Board) -> BoardInfo {
        let mut points = [0i8; 26];
        points[BAR] = b.opp_bar;
        points[FINISH] = b.opp_finished;
        let mut inner = b.opp_finished as i32; // checkers home or finished
        let mut occ = PipSet::EMPTY;
        let mut blocked = PipSet::EMPTY;
        for i in 1..25 {
            let c = -b.points[25 - i];
            points[i] = c;
            if c > 0 {
                occ = occ.inserted(i);
                if i > 18 {
                    inner += c as i32;
                }
            } else if c < -1 {
                blocked = blocked.inserted(i);
            }
        }
        let outside = CHECKERS_PER_SIDE - inner;
        let base = if outside < 4 && points[BAR] == 0 {
            BEAROFF_PIPS
        } else {
            BOARD_PIPS
        };
        BoardInfo {
            board: Board {
                points,
                opp_finished: b.points[FINISH],
                opp_bar: b.points[BAR],
                pip_count: b.opp_pip_count,
                opp_pip_count: b.pip_count,
            },
            info: Info {
                occ,
                avail: PipSet(base & !blocked.0),
                outside,
            },
        }
    }

    /// Board for a mover bare-off configuration, with the opponent's 15
    /// checkers parked out of contact.
    pub fn from_inner(c: &InnerConfig) -> BoardInfo {
        let mut points = [0i8; 26];
        points[18] = -(CHECKERS_PER_SIDE as i8);
        points[FINISH] = c[0] as i8;
        let mut occ = PipSet::EMPTY;
        let mut pip_count = 0i16;
        for i in 1..N_CLASSES {
            points[25 - i] = c[i] as i8;
            if c[i] > 0 {
                occ = occ.inserted(25 - i);
            }
            pip_count += (i as i32 * c[i]) as i16;
        }
        BoardInfo {
            board: Board {
                points,
                opp_finished: 0,
                opp_bar: 0,
                pip_count,
                opp_pip_count: CHECKERS_PER_SIDE as i16 * 18,
            },
            info: Info {
                occ,
                avail: PipSet(BEAROFF_PIPS),
                outside: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_board_accounting() {
        let b = Board::new();
        assert_eq!(b.checker_counts(), (15, 15));
        assert_eq!(b.pip_count, 167);
        assert_eq!(b.opp_pip_count, 167);
    }

    #[test]
    fn flip_is_an_involution() {
        let b = Board::new();
        let f = BoardInfo::flipped(&b);
        assert_eq!(BoardInfo::flipped(&f.board).board, b);
        assert_eq!(f.board.checker_counts(), (15, 15));
        assert_eq!(f.board.pip_count, 167);
    }

    #[test]
    fn opening_flip_info() {
        let f = BoardInfo::flipped(&Board::new());
        // By symmetry the flipped opening occupies the mirror pips and is
        // blocked on the mirrors of the mover's stacks.
        let occ: Vec<_> = f.info.occ.collect();
        assert_eq!(occ, vec![1, 12, 17, 19]);
        for p in [6, 8, 13, 24] {
            assert!(!f.info.avail.contains(p));
        }
        assert!(f.info.avail.contains(5));
        assert_eq!(f.info.outside, 10);
        // 10 checkers outside: no bear-off bits.
        assert!(!f.info.avail.contains(25));
    }

    #[test]
    fn move_and_undo_restore_board() {
        let mut b = Board::new();
        let orig = b.clone();
        let hit = b.move_checker(1, 4);
        assert!(!hit);
        assert_eq!(b.pip_count, 164);
        b.undo_move(1, 4, hit);
        assert_eq!(b, orig);
    }

    #[test]
    fn hit_moves_opponent_to_bar() {
        let mut b = Board::new();
        b.points[4] = -1; // plant an opponent blot
        b.opp_pip_count += 4 - 13; // pretend it wandered from 13
        b.points[13] = -4;
        let orig = b.clone();
        let hit = b.move_checker(1, 4);
        assert!(hit);
        assert_eq!(b.points[4], 1);
        assert_eq!(b.opp_bar, 1);
        assert_eq!(b.opp_pip_count, orig.opp_pip_count + 21);
        b.undo_move(1, 4, hit);
        assert_eq!(b, orig);
    }

    #[test]
    fn bear_off_round_trip() {
        let mut bi = BoardInfo::from_inner(&[10, 1, 0, 0, 4, 0, 0]);
        assert_eq!(bi.board.pip_count, 1 + 4 * 4);
        let orig = bi.board.clone();
        bi.board.bear_off(24);
        assert_eq!(bi.board.finished(), 11);
        assert_eq!(bi.board.pip_count, 16);
        bi.board.undo_bear_off(24);
        assert_eq!(bi.board, orig);
    }

    #[test]
    fn finished_slot_bear_off_is_a_no_op() {
        let mut bi = BoardInfo::from_inner(&[15, 0, 0, 0, 0, 0, 0]);
        let orig = bi.board.clone();
        bi.board.bear_off(25);
        assert_eq!(bi.board, orig);
    }

    #[test]
    fn backmost_check() {
        let bi = BoardInfo::from_inner(&[11, 1, 0, 2, 0, 0, 1]);
        assert!(bi.board.backmost(19));
        assert!(!bi.board.backmost(22));
        assert!(!bi.board.backmost(24));
    }
}
