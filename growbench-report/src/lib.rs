#![warn(missing_docs)]
//! Growbench Report - Aggregation and Output
//!
//! Turns per-entry throughput samples into per-label series and renders
//! them into the supported output shapes:
//! - Chart data (serializable payloads for an external renderer)
//! - JSON (machine-readable per-label records)
//! - CSV (spreadsheet-compatible)
//! - Human-readable terminal output
//!
//! Also hosts the growth-curve synthesis that overlays the canonical
//! complexity classes on a measured series.

mod chart;
mod csv_out;
mod growth;
mod human;
mod json;
mod report;

pub use chart::{
    AxisRange, ChartDocument, ChartSpec, ReportMeta, chart_document, comparison_chart,
    growth_chart,
};
pub use csv_out::generate_csv_report;
pub use growth::{
    ComparisonBundle, GrowthClass, GrowthError, ReferenceSeries, anchor_size, compare,
};
pub use human::format_human_output;
pub use json::{SeriesRecord, generate_json_report, series_records};
pub use report::{ReportError, ReportSet, Series};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON per-label records
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Chart payload for an external renderer
    ChartData,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "chart" | "chart-data" => Ok(OutputFormat::ChartData),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
