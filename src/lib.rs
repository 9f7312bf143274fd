// Pink Morsel Visualiser - Core Library
// Exposes the extract pipeline and dashboard data layer for the ETL CLI,
// the web server, and tests

pub mod dashboard;
pub mod error;
pub mod loader;
pub mod sales;

// Re-export commonly used types
pub use dashboard::{
    aggregate_sales, load_extract, AggregatedPoint, RegionFilter, SalesPoint, PRICE_INCREASE_DATE,
};
pub use error::EtlError;
pub use loader::{
    find_csv_files, load_all, load_and_validate_csv, CleanedTransaction, RawRecord,
    REQUIRED_COLUMNS,
};
pub use sales::{build_extract, build_sales_records, write_extract, SalesRecord, TARGET_PRODUCT};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
