//! Output Formatting
//!
//! Human-readable terminal output for a completed run: one table with the
//! size sequence as columns and one row per label. Values are reported in
//! the run's per-iteration display unit.

use crate::report::ReportSet;

fn format_value(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else if value.abs() >= 1_000_000.0 || value.abs() < 0.001 {
        format!("{:.2e}", value)
    } else if value.abs() >= 1000.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a report for human-readable terminal display.
pub fn format_human_output(report: &ReportSet) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Growth Results\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');

    let unit = report.per_iteration_unit();
    if unit > 1.0 {
        output.push_str(&format!("Throughput in {:.0} iterations per second\n", unit));
    } else {
        output.push_str("Throughput in iterations per second\n");
    }
    output.push('\n');

    let max_name_len = report
        .labels()
        .iter()
        .map(|l| l.len())
        .max()
        .unwrap_or(12);

    let col_width = report
        .sizes()
        .iter()
        .map(|s| s.to_string().len())
        .max()
        .unwrap_or(8)
        .max(10);

    // Header row with sizes
    output.push_str(&format!("  {:<width$}", "", width = max_name_len));
    for size in report.sizes() {
        output.push_str(&format!(" | {:>w$}", size, w = col_width));
    }
    output.push('\n');

    // Separator
    output.push_str(&format!("  {}", "-".repeat(max_name_len)));
    for _ in report.sizes() {
        output.push_str(&format!("-+-{}", "-".repeat(col_width)));
    }
    output.push('\n');

    // One row per label
    for series in report.all_series() {
        output.push_str(&format!("  {:<width$}", series.label(), width = max_name_len));
        for &size in report.sizes() {
            let value = series.get(size).unwrap_or(0.0) / unit;
            output.push_str(&format!(" | {:>w$}", format_value(value), w = col_width));
        }
        output.push('\n');
    }

    output
}
