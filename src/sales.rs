// Sales Builder
// Filters cleaned rows to the target product and writes the formatted extract

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EtlError;
use crate::loader::{load_all, CleanedTransaction};

/// The single product the extract is built from. Matching is exact and
/// case-sensitive on the trimmed product text.
pub const TARGET_PRODUCT: &str = "pink morsel";

/// One row of the formatted extract.
/// Field order here is the output contract: `Sales,Date,Region`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Sales")]
    pub sales: f64,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Region")]
    pub region: String,
}

/// Reduce cleaned rows to sales records: keep the target product, drop rows
/// with a missing quantity or price, compute `Sales = quantity * price`.
/// Date and Region pass through unchanged.
pub fn build_sales_records(rows: Vec<CleanedTransaction>) -> Vec<SalesRecord> {
    rows.into_iter()
        .filter(|row| row.product == TARGET_PRODUCT)
        .filter_map(|row| {
            let quantity = row.quantity?;
            let price = row.price?;
            Some(SalesRecord {
                sales: quantity * price,
                date: row.date,
                region: row.region,
            })
        })
        .collect()
}

/// Build the full extract from a directory of raw transaction files.
pub fn build_extract(data_dir: &Path) -> Result<Vec<SalesRecord>, EtlError> {
    Ok(build_sales_records(load_all(data_dir)?))
}

/// Write the extract as CSV with the exact header `Sales,Date,Region`.
///
/// Callers only reach this after the whole batch built successfully, so a
/// failed run never leaves a partial output file behind.
pub fn write_extract(records: &[SalesRecord], output: &Path) -> Result<(), EtlError> {
    let mut writer = csv::Writer::from_path(output)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn cleaned(product: &str, quantity: Option<f64>, price: Option<f64>) -> CleanedTransaction {
        CleanedTransaction {
            product: product.to_string(),
            quantity,
            price,
            date: "2021-01-10".to_string(),
            region: "north".to_string(),
        }
    }

    #[test]
    fn test_sales_is_quantity_times_price() {
        let records = build_sales_records(vec![cleaned(TARGET_PRODUCT, Some(2.0), Some(3.0))]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sales, 6.0);
        assert_eq!(records[0].date, "2021-01-10");
        assert_eq!(records[0].region, "north");
    }

    #[test]
    fn test_only_target_product_is_kept() {
        let records = build_sales_records(vec![
            cleaned("gold morsel", Some(2.0), Some(3.0)),
            cleaned("Pink Morsel", Some(2.0), Some(3.0)),
            cleaned("pink morsels", Some(2.0), Some(3.0)),
            cleaned(TARGET_PRODUCT, Some(1.0), Some(4.0)),
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sales, 4.0);
    }

    #[test]
    fn test_rows_with_missing_numerics_are_dropped() {
        let records = build_sales_records(vec![
            cleaned(TARGET_PRODUCT, None, Some(3.0)),
            cleaned(TARGET_PRODUCT, Some(2.0), None),
            cleaned(TARGET_PRODUCT, Some(2.0), Some(3.5)),
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sales, 7.0);
    }

    #[test]
    fn test_write_extract_header_and_order() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output.csv");

        let records = vec![
            SalesRecord {
                sales: 6.0,
                date: "2021-01-10".to_string(),
                region: "north".to_string(),
            },
            SalesRecord {
                sales: 3.5,
                date: "2021-01-10".to_string(),
                region: "south".to_string(),
            },
        ];
        write_extract(&records, &output).unwrap();

        let contents = fs::read_to_string(&output).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Sales,Date,Region"));
        assert_eq!(lines.next(), Some("6.0,2021-01-10,north"));
        assert_eq!(lines.next(), Some("3.5,2021-01-10,south"));
    }

    #[test]
    fn test_build_extract_end_to_end() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        fs::write(
            data_dir.join("daily_sales_data_0.csv"),
            "product,quantity,price,date,region\n\
             pink morsel,2,$3.00,2021-01-10,north\n\
             gold morsel,5,$9.99,2021-01-10,north\n\
             pink morsel,1,\"$1,200.50\",2021-01-11,south\n",
        )
        .unwrap();

        let records = build_extract(&data_dir).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sales, 6.0);
        assert_eq!(records[1].sales, 1200.50);
        assert_eq!(records[1].region, "south");
    }

    #[test]
    fn test_build_extract_empty_directory_fails() {
        let dir = tempdir().unwrap();

        let err = build_extract(dir.path()).unwrap_err();
        assert!(matches!(err, EtlError::NoInputFiles { .. }));
    }
}
