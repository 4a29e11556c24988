//! Build the endgame tables and save them to disk.
//!
//! Usage: `precompute [--data-dir DIR] [--exact-ceiling N] [--force]`
//!
//! Skips work when valid table files already exist (unless `--force`),
//! then prints a JSON summary of what was built.

use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use serde::Serialize;

use bareoff::constants::{N_CONFIGS, N_EXACT};
use bareoff::env_config;
use bareoff::tables::EndgameTables;

#[derive(Serialize)]
struct Summary {
    configurations: usize,
    exact_ceiling: usize,
    enr_path: String,
    exact_path: String,
    enr_rebuilt: bool,
    exact_rebuilt: bool,
    elapsed_seconds: f64,
    opening_race_enr: f32,
    opening_race_pwin: f32,
}

fn main() {
    let mut data_dir = env_config::data_dir();
    let mut ceiling = N_EXACT;
    let mut force = false;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("--data-dir requires a value");
                    exit(1);
                }
                data_dir = PathBuf::from(&args[i]);
            }
            "--exact-ceiling" => {
                i += 1;
                let parsed = args.get(i).and_then(|s| s.parse::<usize>().ok());
                match parsed {
                    Some(n) if n >= 2 && n <= N_CONFIGS => ceiling = n,
                    _ => {
                        eprintln!("--exact-ceiling requires a value in 2..={}", N_CONFIGS);
                        exit(1);
                    }
                }
            }
            "--force" => force = true,
            "--help" | "-h" => {
                println!("Usage: precompute [--data-dir DIR] [--exact-ceiling N] [--force]");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                exit(1);
            }
        }
        i += 1;
    }

    env_config::init_rayon_threads();
    let start = Instant::now();

    let (tables, report) = match EndgameTables::load_or_build(&data_dir, ceiling, force) {
        Ok(ok) => ok,
        Err(e) => {
            eprintln!("Failed to prepare tables: {}", e);
            exit(1);
        }
    };

    // Spot checks on a symmetric mid-race position: 10 checkers off, the
    // rest spread over the home board.
    let h = tables.engine.position_hash(&[10, 1, 1, 1, 1, 1, 0]);
    let summary = Summary {
        configurations: N_CONFIGS,
        exact_ceiling: ceiling,
        enr_path: env_config::enr_table_path(&data_dir).display().to_string(),
        exact_path: env_config::exact_table_path(&data_dir)
            .display()
            .to_string(),
        enr_rebuilt: report.enr_rebuilt,
        exact_rebuilt: report.exact_rebuilt,
        elapsed_seconds: start.elapsed().as_secs_f64(),
        opening_race_enr: tables.enr.get(h),
        opening_race_pwin: tables.pnr.pwin_approx(h, h),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize summary: {}", e),
    }
}
