//! # bareoff — backgammon bare-off endgame engine
//!
//! Generates all legal checker moves for a board/dice state and computes
//! optimal decision tables for bare-off races by dynamic programming over
//! every inner-table configuration.
//!
//! ## Structure
//!
//! | Stage | Module | Description |
//! |-------|--------|-------------|
//! | 0 | [`pips`], [`board`] | 32-bit pip sets; mutable board with paired move/undo primitives |
//! | 1 | [`movegen`] | Full move generator: bar entry, doubles backtracking, distinct dice with duplicate suppression, visitor-style [`movegen::MoveSink`] output |
//! | 2 | [`hashing`], [`config_iter`] | Perfect hash over the 54,264 checker multisets (reversed combinatorial rank) and an O(1)-amortized odometer enumerator |
//! | 3 | [`enr`], [`density`] | Expected rolls to bear off and the full rolls-to-bear-off distribution per configuration, filled in ascending hash order |
//! | 4 | [`pwin_exact`] | Exact minimax race win probabilities below a checker ceiling, filled diagonal by diagonal over hash sums, rayon-parallel within a diagonal |
//!
//! Every legal move strictly decreases the mover's hash; both DP fills
//! rely on that ordering.
//!
//! ## Usage
//!
//! Build the bundle once, then query it read-only:
//!
//! ```no_run
//! use bareoff::tables::EndgameTables;
//!
//! let tables = EndgameTables::build();
//! let h = tables.hash(&[10, 2, 1, 0, 2, 0, 0]);
//! let enr = tables.enr(h).unwrap();
//! let p = tables.pwin(h, h).unwrap();
//! println!("ENR {enr:.3}, Pwin {p:.4}");
//! ```
//!
//! ## Numerics
//!
//! Tables store f32; per-entry accumulation runs in f64 before rounding
//! once, which keeps the expectation sums stable over 21 rolls.

pub mod board;
pub mod config_iter;
pub mod constants;
pub mod density;
pub mod enr;
pub mod env_config;
pub mod error;
pub mod hashing;
pub mod movegen;
pub mod pips;
pub mod pwin_exact;
pub mod rolls;
pub mod storage;
pub mod tables;

pub use board::{Board, BoardInfo, Info, InnerConfig};
pub use config_iter::ConfigIter;
pub use error::{QueryError, TableError};
pub use hashing::{Hash, HashEngine};
pub use movegen::{generate_moves, BoardVec, MoveSink};
pub use rolls::{Roll, ROLLS21};
pub use tables::EndgameTables;
