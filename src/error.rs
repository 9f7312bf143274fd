// Error taxonomy for the sales extract pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an extract run.
///
/// Numeric coercion failures are deliberately not represented here: a
/// quantity or price that fails to parse becomes a missing value, and the
/// row is dropped later in the pipeline without aborting the batch.
#[derive(Error, Debug)]
pub enum EtlError {
    /// The data directory contained no `*.csv` files at all.
    #[error("no CSV files found in '{}'", dir.display())]
    NoInputFiles { dir: PathBuf },

    /// An input file's header is missing one or more required columns.
    #[error("CSV '{}' is missing required columns: {missing:?}. Found columns: {found:?}", file.display())]
    MissingColumns {
        file: PathBuf,
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_input_files_names_directory() {
        let err = EtlError::NoInputFiles {
            dir: PathBuf::from("data"),
        };
        assert_eq!(err.to_string(), "no CSV files found in 'data'");
    }

    #[test]
    fn test_missing_columns_names_file_and_columns() {
        let err = EtlError::MissingColumns {
            file: PathBuf::from("data/daily_sales_data_0.csv"),
            missing: vec!["price".to_string(), "region".to_string()],
            found: vec!["product".to_string(), "quantity".to_string(), "date".to_string()],
        };

        let message = err.to_string();
        assert!(message.contains("daily_sales_data_0.csv"));
        assert!(message.contains("price"));
        assert!(message.contains("region"));
        assert!(message.contains("Found columns"));
    }
}
