//! Fixed combinatorial constants shared by the whole engine.

/// Board slot index of the mover's bar.
pub const BAR: usize = 0;
/// Board slot index of the mover's finished count.
pub const FINISH: usize = 25;

/// Checkers per side, always.
pub const CHECKERS_PER_SIDE: i32 = 15;

/// Number of inner-table classes: finished + home pips 1..6.
pub const N_CLASSES: usize = 7;

/// multichoose(7, 15) — number of distinct inner-table configurations.
pub const N_CONFIGS: usize = 54_264;

/// multichoose(7, 7) — hashes below this have at most 7 unfinished
/// checkers. Canonical ceiling of the exact win-probability table.
pub const N_EXACT: usize = 1_716;

/// Playable points as a pip-set word (bits 1..=24).
pub const BOARD_PIPS: u32 = 0x01ff_fffe;
/// Playable points plus synthetic bear-off slots (bits 1..=30).
pub const BEAROFF_PIPS: u32 = 0x7fff_fffe;

/// Pip count of the standard opening position (2*24 + 5*13 + 3*8 + 5*6).
pub const INIT_PIP_COUNT: i16 = 167;

/// Table file magic for ENR tables: "BOFE".
pub const ENR_FILE_MAGIC: u32 = 0x4546_4F42;
/// Table file magic for exact win-probability tables: "BOFX".
pub const EXACT_FILE_MAGIC: u32 = 0x5846_4F42;
/// Current table file format version.
pub const TABLE_FILE_VERSION: u32 = 1;
