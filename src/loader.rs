// CSV Loader & Row Cleaner
// Reads raw Soul Foods transaction files and coerces them into clean rows

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EtlError;

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["product", "quantity", "price", "date", "region"];

/// One transaction row exactly as it appears in an input file.
/// Source of truth; never mutated after read.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
    pub region: String,
}

/// A raw row after cleaning: product trimmed, quantity and price coerced
/// to numbers. Values that fail to parse are carried as `None` so the
/// sales builder can decide to drop the row.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTransaction {
    pub product: String,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub date: String,
    pub region: String,
}

impl CleanedTransaction {
    fn from_raw(raw: RawRecord) -> Self {
        CleanedTransaction {
            product: raw.product.trim().to_string(),
            quantity: parse_quantity(&raw.quantity),
            price: parse_price(&raw.price),
            date: raw.date,
            region: raw.region,
        }
    }
}

/// Coerce a raw quantity field to a number. Non-numeric input is missing,
/// not an error.
fn parse_quantity(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|q| q.is_finite())
}

/// Coerce a raw price field to a number.
///
/// Price values look like "$3.00" or "$1,200.50": the currency symbol and
/// thousands separators are stripped before parsing. Non-numeric input is
/// missing, not an error.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Enumerate the `*.csv` files directly inside `data_dir`, sorted
/// lexicographically so batch runs are deterministic.
pub fn find_csv_files(data_dir: &Path) -> Result<Vec<PathBuf>, EtlError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        let is_csv = path.is_file()
            && path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Load one input file: verify the required column set, then clean every row.
///
/// Header validation is fail-fast: a file missing any required column aborts
/// the whole batch with [`EtlError::MissingColumns`] naming the file and the
/// missing columns, before any row of it is read.
pub fn load_and_validate_csv(path: &Path) -> Result<Vec<CleanedTransaction>, EtlError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

    let found: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !found.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();

    if !missing.is_empty() {
        missing.sort();
        return Err(EtlError::MissingColumns {
            file: path.to_path_buf(),
            missing,
            found,
        });
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        rows.push(CleanedTransaction::from_raw(result?));
    }

    Ok(rows)
}

/// Load and concatenate every input file in `data_dir`.
///
/// Fails with [`EtlError::NoInputFiles`] when the directory yields zero CSV
/// files, and with the first per-file error otherwise (no partial result).
pub fn load_all(data_dir: &Path) -> Result<Vec<CleanedTransaction>, EtlError> {
    let files = find_csv_files(data_dir)?;

    if files.is_empty() {
        return Err(EtlError::NoInputFiles {
            dir: data_dir.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for file in &files {
        rows.extend(load_and_validate_csv(file)?);
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================
