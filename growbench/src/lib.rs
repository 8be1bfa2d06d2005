#![warn(missing_docs)]
//! # Growbench
//!
//! Empirically estimates the time-complexity growth of an operation by
//! running it against inputs of increasing size, measuring throughput at
//! each size, and overlaying canonical reference curves (O(log n), O(n),
//! O(n log n), O(n²)) anchored to a single measured sample.
//!
//! - **Calibrated measurement**: a warm-up pass per entry sizes the timed
//!   batch to a fixed target duration, so cheap and expensive actions are
//!   measured with comparable precision
//! - **Ordered reporting**: per-label series follow the configured size
//!   sequence no matter what order entries complete in
//! - **Growth comparison**: reference curves scaled to coincide with the
//!   measurement at one anchor point, making divergence the signal
//! - **Exports**: chart payloads, JSON records, CSV tables, and a terminal
//!   summary
//!
//! ## Quick Start
//!
//! ```no_run
//! use growbench::prelude::*;
//!
//! let outcome = Job::new(|size| (0..size).collect::<Vec<usize>>())
//!     .steps(5)
//!     .min_size(100)
//!     .step_size(100)
//!     .report("linear scan", |v: &Vec<usize>, size| {
//!         std::hint::black_box(v.iter().position(|&x| x == size - 1));
//!     })
//!     .compare(true)
//!     .json("growth.json")
//!     .run()
//!     .unwrap();
//!
//! println!("{}", growbench::format_human_output(&outcome.report));
//! ```

mod config;
mod job;

pub use config::{GrowConfig, OutputConfig, RunnerConfig};
pub use job::{ErrorPolicy, GeneratorError, Job, RunError, RunOutcome};

// Re-export core types
pub use growbench_core::{
    Calibrator, CalibrationSummary, ConfigError, DEFAULT_MIN_SIZE, DEFAULT_STEPS,
    DEFAULT_STEP_SIZE, DEFAULT_TARGET_DURATION, DEFAULT_WARMUP_DURATION, ExecutionError,
    Runnable, Size, SizeSequence, TimedEntry, TimedTask, Timer, WarmupStats, throughput,
};

// Re-export reporting types
pub use growbench_report::{
    AxisRange, ChartDocument, ChartSpec, ComparisonBundle, GrowthClass, GrowthError,
    OutputFormat, ReferenceSeries, ReportError, ReportMeta, ReportSet, Series, SeriesRecord,
    chart_document, compare, format_human_output, generate_csv_report, generate_json_report,
    series_records,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ErrorPolicy, GrowConfig, GrowthClass, Job, OutputFormat, ReportSet, RunOutcome, Series,
        Size, SizeSequence, compare,
    };
}
