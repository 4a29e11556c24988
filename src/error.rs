//! Error types for the query surface and table persistence.
//!
//! Internal invariant violations (hash mismatches, checker miscounts,
//! illegal bear-offs) are contract bugs and fail fast via `debug_assert!`;
//! only caller-facing precondition and I/O failures are represented here.

use crate::hashing::Hash;
use thiserror::Error;

/// Precondition violation on the query surface. Tooling may legitimately
/// ask about boundary hashes, so these are checked errors, not panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("hash {0} outside the configuration range [0, {limit})", limit = crate::constants::N_CONFIGS)]
    HashOutOfRange(Hash),
    #[error("pair ({mover}, {opp}) exceeds the exact-table ceiling {ceiling}")]
    CeilingExceeded {
        mover: Hash,
        opp: Hash,
        ceiling: usize,
    },
}

/// Table file problems: missing, truncated, or the wrong format.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad table file {path}: magic 0x{magic:08x}, version {version}")]
    BadHeader {
        path: String,
        magic: u32,
        version: u32,
    },
    #[error("table file {path} has {actual} bytes, expected {expected}")]
    SizeMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },
}
