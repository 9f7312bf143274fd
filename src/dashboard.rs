// Dashboard Data Loader & chart aggregation
// Loads the formatted extract back in and derives the per-date series the
// chart renders for a given region filter

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar date of the Pink Morsel price increase, marked on the chart
/// regardless of the active region filter.
pub const PRICE_INCREASE_DATE: &str = "2021-01-15";

/// One extract row after dashboard-side cleaning: a real date, a numeric
/// sales value, and a normalized (lower-cased, trimmed) region.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub sales: f64,
    pub region: String,
}

/// The mutually exclusive region choices offered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFilter {
    All,
    North,
    East,
    South,
    West,
}

impl RegionFilter {
    /// Parse a UI filter value. Case-insensitive; unknown values are `None`.
    pub fn parse(value: &str) -> Option<RegionFilter> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(RegionFilter::All),
            "north" => Some(RegionFilter::North),
            "east" => Some(RegionFilter::East),
            "south" => Some(RegionFilter::South),
            "west" => Some(RegionFilter::West),
            _ => None,
        }
    }

    /// The canonical lowercase name, as stored in the Region column.
    pub fn name(&self) -> &'static str {
        match self {
            RegionFilter::All => "all",
            RegionFilter::North => "north",
            RegionFilter::East => "east",
            RegionFilter::South => "south",
            RegionFilter::West => "west",
        }
    }

    /// Whether a normalized region value falls under this filter.
    /// `All` selects every row.
    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            _ => region == self.name(),
        }
    }
}

/// A single point of the rendered line: total sales for one date.
/// Derived per interaction; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

/// The extract row as written on disk, before type coercion.
#[derive(Debug, Deserialize)]
struct ExtractRow {
    #[serde(rename = "Sales")]
    sales: String,

    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Region")]
    region: String,
}

impl ExtractRow {
    /// Coerce one extract row. Rows with an unparseable date or sales value,
    /// or an empty region, yield `None` and are dropped by the loader.
    fn coerce(self) -> Option<SalesPoint> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()?;
        let sales = self.sales.trim().parse::<f64>().ok().filter(|s| s.is_finite())?;

        let region = self.region.trim().to_lowercase();
        if region.is_empty() {
            return None;
        }

        Some(SalesPoint { date, sales, region })
    }
}

/// Read the formatted extract for the dashboard.
///
/// Malformed rows are silently dropped, mirroring the tolerance of the
/// original visualiser; only a missing or unreadable file is an error.
pub fn load_extract(path: &Path) -> Result<Vec<SalesPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open extract file: {}", path.display()))?;

    let mut points = Vec::new();
    for result in reader.deserialize::<ExtractRow>() {
        let row = result.with_context(|| format!("Failed to read extract file: {}", path.display()))?;
        if let Some(point) = row.coerce() {
            points.push(point);
        }
    }

    Ok(points)
}

/// Aggregate sales by date for the rows selected by `filter`, sorted by
/// date ascending. Recomputed from scratch on every call; there is no
/// caching between redraws.
pub fn aggregate_sales(points: &[SalesPoint], filter: RegionFilter) -> Vec<AggregatedPoint> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for point in points.iter().filter(|p| filter.matches(&p.region)) {
        *by_date.entry(point.date).or_insert(0.0) += point.sales;
    }

    by_date
        .into_iter()
        .map(|(date, sales)| AggregatedPoint { date, sales })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
