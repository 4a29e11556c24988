//! Randomized and exhaustive structural properties: hash bijection,
//! checker conservation across play, and hash descent in a race.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use bareoff::board::{Board, BoardInfo, InnerConfig};
use bareoff::constants::{CHECKERS_PER_SIDE, N_CONFIGS};
use bareoff::hashing::HashEngine;
use bareoff::movegen::{generate_moves, BoardVec};
use bareoff::rolls::ROLLS21;

/// Recompute both pip counts from the raw point array.
fn recount_pips(b: &Board) -> (i16, i16) {
    let mut mover = 25 * b.bar() as i16;
    let mut opp = 25 * b.opp_bar as i16;
    for p in 1..25 {
        let n = b.points[p];
        if n > 0 {
            mover += (25 - p) as i16 * n as i16;
        } else {
            opp += p as i16 * (-n) as i16;
        }
    }
    (mover, opp)
}

#[test]
fn opening_board_pip_counts_are_consistent() {
    let b = Board::new();
    assert_eq!(recount_pips(&b), (b.pip_count, b.opp_pip_count));
}

/// Play random games from the opening, alternating sides via flips,
/// and verify the incremental bookkeeping never drifts.
#[test]
fn random_play_conserves_checkers_and_pip_counts() {
    let engine = HashEngine::new();
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let mut b = Board::new();
        for _ in 0..200 {
            if b.finished() as i32 == CHECKERS_PER_SIDE || b.opp_finished as i32 == CHECKERS_PER_SIDE {
                break;
            }
            let mut bi = BoardInfo::flipped(&b);
            let roll = ROLLS21[rng.random_range(0..21)];
            let mut sink = BoardVec::default();
            generate_moves(&mut bi, &roll, &mut sink);
            assert!(!sink.0.is_empty(), "no successor for roll {}-{}", roll.hi, roll.lo);
            b = sink.0[rng.random_range(0..sink.0.len())].clone();

            assert_eq!(b.checker_counts(), (CHECKERS_PER_SIDE, CHECKERS_PER_SIDE));
            assert_eq!(recount_pips(&b), (b.pip_count, b.opp_pip_count));
            // Once the mover is fully home the fast board hash applies.
            if b.bar() == 0
                && (1..19).all(|p| b.points[p] <= 0)
                && (19..25).all(|p| b.points[p] >= 0)
            {
                let h = engine.board_hash(&b);
                assert!((0..N_CONFIGS as i64).contains(&h));
            }
        }
    }
}

/// In a pure race every play bears in or off, so the mover's hash must
/// strictly decrease with each generated successor.
#[test]
fn race_successors_strictly_decrease_the_hash() {
    let engine = HashEngine::new();
    for h in (1..N_CONFIGS as i64).step_by(101) {
        let mut bi = BoardInfo::from_inner(&engine.inverse_hash(h));
        for roll in &ROLLS21 {
            let mut sink = BoardVec::default();
            generate_moves(&mut bi, roll, &mut sink);
            assert!(!sink.0.is_empty());
            for succ in &sink.0 {
                assert!(engine.board_hash(succ) < h, "hash {} did not drop", h);
            }
        }
    }
}

proptest! {
    #[test]
    fn hash_of_inverse_is_the_identity(h in 0..N_CONFIGS as i64) {
        let engine = HashEngine::new();
        let config = engine.inverse_hash(h);
        prop_assert_eq!(config.iter().sum::<i32>(), CHECKERS_PER_SIDE);
        prop_assert_eq!(engine.position_hash(&config), h);
    }

    #[test]
    fn inverse_of_hash_is_the_identity(classes in proptest::collection::vec(0usize..7, 15)) {
        let engine = HashEngine::new();
        let mut config: InnerConfig = [0; 7];
        for &c in &classes {
            config[c] += 1;
        }
        let h = engine.position_hash(&config);
        prop_assert!((0..N_CONFIGS as i64).contains(&h));
        prop_assert_eq!(engine.inverse_hash(h), config);
    }
}
