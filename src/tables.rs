//! The immutable table bundle and its query surface.
//!
//! All tables are built once — pure functions of fixed combinatorial
//! constants — and read-only afterwards; the bundle can be shared freely
//! across threads. There are no process-wide singletons: construct a
//! bundle explicitly and pass it where it is needed.

use std::path::Path;
use std::time::Instant;

use memmap2::Mmap;

use crate::board::InnerConfig;
use crate::constants::{N_CONFIGS, N_EXACT};
use crate::density::PnrTable;
use crate::enr::EnrTable;
use crate::env_config;
use crate::error::{QueryError, TableError};
use crate::hashing::{Hash, HashEngine};
use crate::pwin_exact::ExactTable;
use crate::storage;

/// f32 table backing: computed in memory, or zero-copy mapped from disk.
pub enum TableValues {
    Owned(Vec<f32>),
    Mmap {
        mmap: Mmap,
        /// Byte offset of the payload (past the file header).
        offset: usize,
        len: usize,
    },
}

impl TableValues {
    pub fn as_slice(&self) -> &[f32] {
        match self {
            TableValues::Owned(v) => v.as_slice(),
            TableValues::Mmap { mmap, offset, len } => {
                // The payload is page-aligned minus the 16-byte header,
                // which keeps f32 alignment; length was validated on load.
                let ptr = unsafe { mmap.as_ptr().add(*offset) } as *const f32;
                unsafe { std::slice::from_raw_parts(ptr, *len) }
            }
        }
    }
}

/// What `EndgameTables::load_or_build` had to recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub enr_rebuilt: bool,
    pub exact_rebuilt: bool,
}

/// The full endgame bundle: hash engine, ENR, PNR and the exact table.
pub struct EndgameTables {
    pub engine: HashEngine,
    pub enr: EnrTable,
    pub pnr: PnrTable,
    pub exact: ExactTable,
}

impl EndgameTables {
    /// Build everything from scratch with the canonical exact ceiling.
    pub fn build() -> EndgameTables {
        EndgameTables::build_with_ceiling(N_EXACT)
    }

    pub fn build_with_ceiling(ceiling: usize) -> EndgameTables {
        let start = Instant::now();
        let engine = HashEngine::new();
        let enr = EnrTable::compute(&engine);
        let pnr = PnrTable::compute(&engine, &enr);
        let exact = ExactTable::compute_sized(&engine, ceiling);
        println!("Endgame tables ready in {:.2}s", start.elapsed().as_secs_f64());
        EndgameTables {
            engine,
            enr,
            pnr,
            exact,
        }
    }

    /// Load the persisted ENR and exact tables from `dir`, recomputing
    /// and saving any that are missing or fail validation (`force`
    /// recomputes both). PNR is never persisted: it is rebuilt from the
    /// ENR table on every load.
    pub fn load_or_build(
        dir: &Path,
        ceiling: usize,
        force: bool,
    ) -> Result<(EndgameTables, BuildReport), TableError> {
        let engine = HashEngine::new();

        let enr_path = env_config::enr_table_path(dir);
        let mut enr_rebuilt = true;
        let enr = if force {
            EnrTable::compute(&engine)
        } else {
            match storage::load_enr_table(&enr_path) {
                Ok(t) => {
                    enr_rebuilt = false;
                    t
                }
                Err(e) => {
                    println!("ENR table not reusable ({}), rebuilding", e);
                    EnrTable::compute(&engine)
                }
            }
        };
        if enr_rebuilt {
            storage::save_enr_table(&enr, &enr_path)?;
        }

        let exact_path = env_config::exact_table_path(dir);
        let mut exact_rebuilt = true;
        let exact = if force {
            ExactTable::compute_sized(&engine, ceiling)
        } else {
            match storage::load_exact_table(&exact_path, ceiling) {
                Ok(t) => {
                    exact_rebuilt = false;
                    t
                }
                Err(e) => {
                    println!("Exact table not reusable ({}), rebuilding", e);
                    ExactTable::compute_sized(&engine, ceiling)
                }
            }
        };
        if exact_rebuilt {
            storage::save_exact_table(&exact, &exact_path)?;
        }

        let report = BuildReport {
            enr_rebuilt,
            exact_rebuilt,
        };
        Ok((EndgameTables::assemble(engine, enr, exact), report))
    }

    /// Assemble a bundle from previously computed ENR/exact tables,
    /// rebuilding the PNR distributions (they are cheap relative to their
    /// serialized size and are not persisted).
    pub fn assemble(engine: HashEngine, enr: EnrTable, exact: ExactTable) -> EndgameTables {
        let pnr = PnrTable::compute(&engine, &enr);
        EndgameTables {
            engine,
            enr,
            pnr,
            exact,
        }
    }

    pub fn hash(&self, c: &InnerConfig) -> Hash {
        self.engine.position_hash(c)
    }

    pub fn inverse_hash(&self, h: Hash) -> Result<InnerConfig, QueryError> {
        self.check(h)?;
        Ok(self.engine.inverse_hash(h))
    }

    /// Expected rolls to bear off.
    pub fn enr(&self, h: Hash) -> Result<f32, QueryError> {
        self.check(h)?;
        Ok(self.enr.get(h))
    }

    /// Exact race win probability; defined only under the table ceiling.
    pub fn pwin_exact(&self, mover: Hash, opp: Hash) -> Result<f32, QueryError> {
        self.check(mover)?;
        self.check(opp)?;
        let ceiling = self.exact.ceiling() as Hash;
        if mover >= ceiling || opp >= ceiling {
            return Err(QueryError::CeilingExceeded {
                mover,
                opp,
                ceiling: self.exact.ceiling(),
            });
        }
        Ok(self.exact.get(mover, opp))
    }

    /// Race win probability from the PNR distributions; always defined.
    pub fn pwin_approx(&self, mover: Hash, opp: Hash) -> Result<f32, QueryError> {
        self.check(mover)?;
        self.check(opp)?;
        Ok(self.pnr.pwin_approx(mover, opp))
    }

    /// Best available estimate: exact under the ceiling, approximation
    /// beyond it.
    pub fn pwin(&self, mover: Hash, opp: Hash) -> Result<f32, QueryError> {
        match self.pwin_exact(mover, opp) {
            Err(QueryError::CeilingExceeded { .. }) => self.pwin_approx(mover, opp),
            other => other,
        }
    }

    fn check(&self, h: Hash) -> Result<(), QueryError> {
        if (0..N_CONFIGS as Hash).contains(&h) {
            Ok(())
        } else {
            Err(QueryError::HashOutOfRange(h))
        }
    }
}
