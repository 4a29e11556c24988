//! Environment configuration shared by the binaries.

use std::path::PathBuf;

/// Read `BAREOFF_DATA_DIR` (default `"data"`): where table files live.
pub fn data_dir() -> PathBuf {
    PathBuf::from(std::env::var("BAREOFF_DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

pub fn enr_table_path(dir: &std::path::Path) -> PathBuf {
    dir.join("enr.bin")
}

pub fn exact_table_path(dir: &std::path::Path) -> PathBuf {
    dir.join("pwin_exact.bin")
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8) and
/// build the global rayon pool. Tolerates an already-initialized pool.
pub fn init_rayon_threads() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();
    println!("Rayon threads: {}", num_threads);
    num_threads
}
