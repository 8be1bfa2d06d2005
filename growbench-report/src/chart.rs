//! Chart Data Output
//!
//! Serializable chart payloads for an external renderer: one growth chart
//! covering every label, plus (when comparison is requested) one chart per
//! label overlaying the four reference curves. Pure functions over report
//! data; no template state.

use crate::growth::{self, ComparisonBundle, GrowthError};
use crate::json::SeriesRecord;
use crate::report::ReportSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shared y-axis range for all series rendered together in one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    /// `floor(0.8 * smallest value)` across the chart's series.
    pub min: f64,
    /// `ceil(1.2 * largest value)` across the chart's series.
    pub max: f64,
}

impl AxisRange {
    /// Derive the range from every value of every series in one chart, so
    /// charts sharing a comparison group share one y-scale.
    pub fn covering<'a>(series: impl IntoIterator<Item = &'a SeriesRecord>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in series {
            for &(_, value) in &record.data {
                min = min.min(value);
                max = max.max(value);
            }
        }
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 0.0 };
        }
        Self {
            min: (min * 0.8).floor(),
            max: (max * 1.2).ceil(),
        }
    }
}

/// One renderable chart: named series over a shared axis range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart title.
    pub name: String,
    /// Series in display order.
    pub series: Vec<SeriesRecord>,
    /// Derived y-axis range.
    pub axis: AxisRange,
}

/// Run metadata carried on the chart document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    /// When the document was produced.
    pub timestamp: DateTime<Utc>,
    /// Warm-up budget per entry, in nanoseconds.
    pub warmup_time_ns: u64,
    /// Timed-run target duration, in nanoseconds.
    pub measurement_time_ns: u64,
}

impl ReportMeta {
    /// Capture metadata for a run with the given durations.
    pub fn new(warmup: std::time::Duration, measurement: std::time::Duration) -> Self {
        Self {
            timestamp: Utc::now(),
            warmup_time_ns: warmup.as_nanos() as u64,
            measurement_time_ns: measurement.as_nanos() as u64,
        }
    }
}

/// Complete chart payload for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDocument {
    /// Run metadata.
    pub meta: ReportMeta,
    /// The growth chart followed by any per-label comparison charts.
    pub charts: Vec<ChartSpec>,
}

/// The growth chart: every label's measured series on one axis.
pub fn growth_chart(report: &ReportSet) -> ChartSpec {
    let series = crate::json::series_records(report);
    let axis = AxisRange::covering(&series);
    ChartSpec {
        name: "Growth Chart".to_string(),
        series,
        axis,
    }
}

/// One label's comparison chart: the measured series plus the four
/// reference curves, sharing one axis.
pub fn comparison_chart(bundle: &ComparisonBundle) -> ChartSpec {
    let mut series = Vec::with_capacity(1 + bundle.references.len());
    series.push(SeriesRecord {
        name: bundle.label.clone(),
        data: bundle.measured.clone(),
    });
    for reference in &bundle.references {
        series.push(SeriesRecord {
            name: reference.class.name().to_string(),
            data: reference.points.clone(),
        });
    }
    let axis = AxisRange::covering(&series);
    ChartSpec {
        name: bundle.label.clone(),
        series,
        axis,
    }
}

/// Build the full chart payload: the growth chart, plus one comparison
/// chart per label when `compare` is set.
pub fn chart_document(
    report: &ReportSet,
    meta: ReportMeta,
    compare: bool,
) -> Result<ChartDocument, GrowthError> {
    let mut charts = vec![growth_chart(report)];
    if compare {
        for series in report.all_series() {
            let bundle = growth::compare(series, report.sizes())?;
            charts.push(comparison_chart(&bundle));
        }
    }
    Ok(ChartDocument { meta, charts })
}
