//! CSV Output
//!
//! Header row is the size sequence with an empty leading cell; each
//! following row is one label's throughput values in size order.

use crate::report::ReportSet;

/// Quote a field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Generate a CSV report.
///
/// Layout: `["", size_1, ..., size_k]` then `[label, v_1, ..., v_k]` per
/// label, in label definition order.
pub fn generate_csv_report(report: &ReportSet) -> String {
    let mut out = String::new();

    out.push_str(
        &std::iter::once(String::new())
            .chain(report.sizes().iter().map(|s| s.to_string()))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');

    for series in report.all_series() {
        let mut row = vec![csv_field(series.label())];
        row.extend(series.points().map(|(_, value)| value.to_string()));
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}
