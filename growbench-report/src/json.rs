//! JSON Output
//!
//! One record per label: `{"name": label, "data": {"<size>": throughput}}`,
//! with sizes as string keys in size-sequence order.

use crate::report::ReportSet;
use growbench_core::Size;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One label's series in export shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRecord {
    /// Label the series belongs to.
    pub name: String,
    /// Ordered size → value mapping, serialized with string keys.
    #[serde(serialize_with = "serialize_points")]
    pub data: Vec<(Size, f64)>,
}

fn serialize_points<S: Serializer>(points: &[(Size, f64)], s: S) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(points.len()))?;
    for (size, value) in points {
        map.serialize_entry(&size.to_string(), value)?;
    }
    map.end()
}

/// Export shape for every label of a report, in label order.
pub fn series_records(report: &ReportSet) -> Vec<SeriesRecord> {
    report
        .all_series()
        .map(|series| SeriesRecord {
            name: series.label().to_string(),
            data: series.points().collect(),
        })
        .collect()
}

/// Generate a prettified JSON report.
///
/// Serializes every label's series into machine-readable JSON.
pub fn generate_json_report(report: &ReportSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&series_records(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use growbench_core::SizeSequence;

    fn sample_report() -> ReportSet {
        let mut report = ReportSet::new(SizeSequence::arithmetic(2, 100, 100).unwrap());
        report.record("#at", 100, 1250.0).unwrap();
        report.record("#at", 200, 1175.5).unwrap();
        report
    }

    #[test]
    fn test_single_label_two_sizes() {
        let json = generate_json_report(&sample_report()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "#at");
        assert_eq!(records[0]["data"]["100"], 1250.0);
        assert_eq!(records[0]["data"]["200"], 1175.5);
    }

    #[test]
    fn test_size_keys_keep_sequence_order() {
        let mut report = ReportSet::new(SizeSequence::arithmetic(3, 50, 200).unwrap());
        // Recorded out of order; export must follow the sequence.
        report.record("scan", 450, 1.0).unwrap();
        report.record("scan", 50, 3.0).unwrap();
        report.record("scan", 250, 2.0).unwrap();

        let json = generate_json_report(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&String> = parsed[0]["data"].as_object().unwrap().keys().collect();
        assert_eq!(keys, ["50", "250", "450"]);
    }

    #[test]
    fn test_labels_keep_definition_order() {
        let mut report = ReportSet::new(SizeSequence::arithmetic(1, 100, 100).unwrap());
        report.record("zeta", 100, 1.0).unwrap();
        report.record("alpha", 100, 2.0).unwrap();

        let records = series_records(&report);
        assert_eq!(records[0].name, "zeta");
        assert_eq!(records[1].name, "alpha");
    }
}
