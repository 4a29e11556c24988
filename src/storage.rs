//! Binary table persistence.
//!
//! Format: 16-byte header (magic, version, element count, reserved) +
//! raw little-endian f32 payload. Loading validates magic, version and
//! exact file size, then hands out a zero-copy mmap.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use memmap2::Mmap;

use crate::constants::{ENR_FILE_MAGIC, EXACT_FILE_MAGIC, N_CONFIGS, TABLE_FILE_VERSION};
use crate::enr::EnrTable;
use crate::error::TableError;
use crate::pwin_exact::ExactTable;
use crate::tables::TableValues;

const HEADER_SIZE: usize = 16;

#[repr(C)]
struct TableFileHeader {
    magic: u32,
    version: u32,
    count: u32,
    reserved: u32,
}

fn write_table(path: &Path, magic: u32, count: u32, values: &[f32]) -> Result<(), TableError> {
    let start = Instant::now();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = File::create(path)?;

    let header = TableFileHeader {
        magic,
        version: TABLE_FILE_VERSION,
        count,
        reserved: 0,
    };
    let header_bytes = unsafe {
        std::slice::from_raw_parts(&header as *const TableFileHeader as *const u8, HEADER_SIZE)
    };
    f.write_all(header_bytes)?;

    let data_bytes = unsafe {
        std::slice::from_raw_parts(values.as_ptr() as *const u8, std::mem::size_of_val(values))
    };
    f.write_all(data_bytes)?;

    println!(
        "Saved {} values to {} in {:.2} ms",
        values.len(),
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Validate the header and map the payload. The header's count field is
/// checked against `expected_count`; the file must hold exactly
/// `payload_len` f32 values (the two differ for square tables).
fn read_table(
    path: &Path,
    magic: u32,
    expected_count: usize,
    payload_len: usize,
) -> Result<TableValues, TableError> {
    let start = Instant::now();
    let file = File::open(path)?;
    let metadata = file.metadata()?;

    let expected_size = HEADER_SIZE + payload_len * std::mem::size_of::<f32>();
    if metadata.len() as usize != expected_size {
        return Err(TableError::SizeMismatch {
            path: path.display().to_string(),
            expected: expected_size,
            actual: metadata.len() as usize,
        });
    }

    let mmap = unsafe { Mmap::map(&file)? };
    let header = unsafe { &*(mmap.as_ptr() as *const TableFileHeader) };
    if header.magic != magic
        || header.version != TABLE_FILE_VERSION
        || header.count as usize != expected_count
    {
        return Err(TableError::BadHeader {
            path: path.display().to_string(),
            magic: header.magic,
            version: header.version,
        });
    }

    println!(
        "Loaded {} values from {} via zero-copy mmap in {:.2} ms",
        payload_len,
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(TableValues::Mmap {
        mmap,
        offset: HEADER_SIZE,
        len: payload_len,
    })
}

pub fn save_enr_table(enr: &EnrTable, path: &Path) -> Result<(), TableError> {
    write_table(path, ENR_FILE_MAGIC, enr.len() as u32, enr.values())
}

pub fn load_enr_table(path: &Path) -> Result<EnrTable, TableError> {
    let values = read_table(path, ENR_FILE_MAGIC, N_CONFIGS, N_CONFIGS)?;
    Ok(EnrTable::from_values(values))
}

pub fn save_exact_table(exact: &ExactTable, path: &Path) -> Result<(), TableError> {
    write_table(
        path,
        EXACT_FILE_MAGIC,
        exact.ceiling() as u32,
        exact.values(),
    )
}

/// The header count of an exact table is its hash ceiling; the payload is
/// `ceiling * ceiling` values.
pub fn load_exact_table(path: &Path, ceiling: usize) -> Result<ExactTable, TableError> {
    let values = read_table(path, EXACT_FILE_MAGIC, ceiling, ceiling * ceiling)?;
    Ok(ExactTable::from_values(ceiling, values))
}

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}
