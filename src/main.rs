// Pink Morsel Visualiser - ETL entry point
// Combines raw Soul Foods transaction CSVs into the formatted sales extract

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use morsel_visualiser::{build_sales_records, find_csv_files, load_and_validate_csv, write_extract, EtlError};

/// Combine Soul Foods transaction CSVs into a single formatted sales
/// extract with exactly three columns: Sales, Date, Region
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Directory containing the raw transaction CSV files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Path of the extract file to write
    #[arg(long, default_value = "output.csv")]
    output: PathBuf,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    println!("🧁 Pink Morsel Visualiser - Sales Extract Builder");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Find input files
    println!("\n📂 Scanning '{}'...", args.data_dir.display());
    let files = find_csv_files(&args.data_dir)?;
    if files.is_empty() {
        return Err(EtlError::NoInputFiles {
            dir: args.data_dir.clone(),
        }
        .into());
    }
    println!("✓ Found {} CSV file(s)", files.len());

    // 2. Load, validate and clean each file (fail-fast, no partial output)
    let mut rows = Vec::new();
    for file in &files {
        let file_rows = load_and_validate_csv(file)?;
        println!("✓ {}: {} rows", file.display(), file_rows.len());
        rows.extend(file_rows);
    }

    // 3. Filter to pink morsel and compute Sales
    let records = build_sales_records(rows);

    // 4. Write the extract
    write_extract(&records, &args.output)?;
    println!("\n✅ Wrote {} rows to '{}'", records.len(), args.output.display());

    Ok(())
}
