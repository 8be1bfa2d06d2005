//! Job Orchestration
//!
//! A [`Job`] owns one benchmark run: it builds the size sequence, generates
//! a test input per (label, size) pair, calibrates every entry against the
//! target duration, executes the timed runs sequentially, and aggregates
//! throughput into a [`ReportSet`]. Configured report files are written
//! after a successful run.

use crate::config::GrowConfig;
use growbench_core::{
    Calibrator, ConfigError, DEFAULT_MIN_SIZE, DEFAULT_STEPS, DEFAULT_STEP_SIZE,
    DEFAULT_TARGET_DURATION, DEFAULT_WARMUP_DURATION, ExecutionError, Runnable, Size,
    SizeSequence, TimedEntry, panic_message, per_iteration_unit, throughput,
};
use growbench_report::{
    GrowthError, ReportError, ReportMeta, ReportSet, chart_document, generate_csv_report,
    generate_json_report,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

/// Failure of the user generator function. Always aborts the whole run;
/// no partial report is produced.
#[derive(Debug, Clone, Error)]
#[error("generator failed at size {size}: {message}")]
pub struct GeneratorError {
    /// Size the generator was asked to build an input for.
    pub size: Size,
    /// Panic payload rendered as text.
    pub message: String,
}

/// Any failure surfaced by [`Job::run`].
#[derive(Debug, Error)]
pub enum RunError {
    /// Invalid size-sequence parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The generator panicked.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    /// An action panicked and the abort policy is in effect.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// A sample could not be placed in the report.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// Comparison-curve synthesis failed during chart export.
    #[error(transparent)]
    Growth(#[from] GrowthError),
    /// A report file could not be written.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    /// A report payload could not be serialized.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to do when an action fails during calibration or a timed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the whole run on the first failing entry.
    #[default]
    Abort,
    /// Drop the failing label (none of its points are reported), record the
    /// failure, and continue with the remaining labels.
    SkipLabel,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Aggregated throughput per label.
    pub report: ReportSet,
    /// Labels dropped under [`ErrorPolicy::SkipLabel`], with the failure
    /// that removed each.
    pub failures: Vec<ExecutionError>,
}

type SharedAction<G> = Rc<RefCell<dyn FnMut(&G, Size)>>;

/// Builder and orchestrator for one benchmark run.
///
/// ```no_run
/// use growbench::Job;
///
/// let outcome = Job::new(|size| (0..size).collect::<Vec<_>>())
///     .steps(3)
///     .report("sum", |v: &Vec<usize>, _size| {
///         std::hint::black_box(v.iter().sum::<usize>());
///     })
///     .run()
///     .unwrap();
/// println!("{:?}", outcome.report.labels());
/// ```
pub struct Job<G: 'static> {
    steps: usize,
    min_size: Size,
    step_size: Size,
    incrementor: Option<Box<dyn Fn(usize) -> Size>>,
    warmup: Duration,
    time: Duration,
    compare: bool,
    policy: ErrorPolicy,
    generator: Box<dyn Fn(Size) -> G>,
    actions: Vec<(String, SharedAction<G>)>,
    json_path: Option<PathBuf>,
    csv_path: Option<PathBuf>,
    chart_path: Option<PathBuf>,
}

impl<G: 'static> Job<G> {
    /// Create a job around the generator that builds a test input for each
    /// size.
    pub fn new(generator: impl Fn(Size) -> G + 'static) -> Self {
        Self {
            steps: DEFAULT_STEPS,
            min_size: DEFAULT_MIN_SIZE,
            step_size: DEFAULT_STEP_SIZE,
            incrementor: None,
            warmup: DEFAULT_WARMUP_DURATION,
            time: DEFAULT_TARGET_DURATION,
            compare: false,
            policy: ErrorPolicy::default(),
            generator: Box::new(generator),
            actions: Vec::new(),
            json_path: None,
            csv_path: None,
            chart_path: None,
        }
    }

    /// Number of sizes to measure at.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Smallest size of the arithmetic sequence.
    pub fn min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    /// Distance between consecutive arithmetic sizes.
    pub fn step_size(mut self, step_size: Size) -> Self {
        self.step_size = step_size;
        self
    }

    /// Supply a custom size incrementor; the sequence becomes
    /// `[f(1), ..., f(steps)]`. Takes precedence over the arithmetic
    /// parameters.
    pub fn incrementor(mut self, f: impl Fn(usize) -> Size + 'static) -> Self {
        self.incrementor = Some(Box::new(f));
        self
    }

    /// Warm-up budget per entry.
    pub fn warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Target duration for each calibrated timed run.
    pub fn time(mut self, time: Duration) -> Self {
        self.time = time;
        self
    }

    /// Include per-label comparison charts in the chart payload.
    pub fn compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    /// What to do when an action fails mid-run.
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register one labeled action, measured at every size.
    pub fn report(
        mut self,
        label: impl Into<String>,
        action: impl FnMut(&G, Size) + 'static,
    ) -> Self {
        let action: SharedAction<G> = Rc::new(RefCell::new(action));
        self.actions.push((label.into(), action));
        self
    }

    /// Write the JSON report here after the run.
    pub fn json(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_path = Some(path.into());
        self
    }

    /// Write the CSV report here after the run.
    pub fn csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(path.into());
        self
    }

    /// Write the chart payload here after the run.
    pub fn chart_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_path = Some(path.into());
        self
    }

    /// Apply a loaded configuration file onto this job.
    pub fn with_config(mut self, config: &GrowConfig) -> anyhow::Result<Self> {
        self.warmup = Duration::from_nanos(GrowConfig::parse_duration(&config.runner.warmup_time)?);
        self.time =
            Duration::from_nanos(GrowConfig::parse_duration(&config.runner.measurement_time)?);
        self.steps = config.runner.steps;
        self.min_size = config.runner.min_size;
        self.step_size = config.runner.step_size;
        if let Some(path) = &config.output.json {
            self.json_path = Some(path.into());
        }
        if let Some(path) = &config.output.csv {
            self.csv_path = Some(path.into());
        }
        if let Some(path) = &config.output.chart_data {
            self.chart_path = Some(path.into());
        }
        self.compare = config.output.compare;
        Ok(self)
    }

    /// Execute the run: build sizes, generate inputs, calibrate every
    /// entry, run the timed batches sequentially, aggregate throughput,
    /// and write any configured report files.
    pub fn run(mut self) -> Result<RunOutcome, RunError> {
        let sizes = match self.incrementor.take() {
            Some(f) => SizeSequence::from_incrementor(self.steps, |i| f(i))?,
            None => SizeSequence::arithmetic(self.steps, self.min_size, self.step_size)?,
        };

        // One entry per (label, size), label-major. A label's action is
        // shared across its entries through a RefCell.
        let mut groups = Vec::with_capacity(self.actions.len());
        for (label, action) in &self.actions {
            let mut entries = Vec::with_capacity(sizes.len());
            for &size in sizes.sizes() {
                let input = catch_unwind(AssertUnwindSafe(|| (self.generator)(size))).map_err(
                    |panic| GeneratorError {
                        size,
                        message: panic_message(panic),
                    },
                )?;
                let action = Rc::clone(action);
                entries.push(TimedEntry::new(
                    label.clone(),
                    size,
                    input,
                    move |input: &G, size: Size| (&mut *action.borrow_mut())(input, size),
                ));
            }
            groups.push((label.clone(), entries, None::<ExecutionError>));
        }

        let total_entries: u64 = groups.iter().map(|(_, e, _)| e.len() as u64).sum();
        let pb = ProgressBar::new(total_entries * 2);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        // Calibration pass over every entry, then the shared display unit.
        let calibrator = Calibrator::new(self.warmup, self.time);
        let mut max_estimate = 0u64;
        for (label, entries, failure) in groups.iter_mut() {
            for entry in entries.iter_mut() {
                if failure.is_none() {
                    pb.set_message(format!("calibrating {} @ {}", label, entry.size()));
                    match calibrator.calibrate(entry) {
                        Ok(iterations) => max_estimate = max_estimate.max(iterations),
                        Err(err) => match self.policy {
                            ErrorPolicy::Abort => {
                                pb.abandon_with_message("aborted");
                                return Err(err.into());
                            }
                            ErrorPolicy::SkipLabel => *failure = Some(err),
                        },
                    }
                }
                pb.inc(1);
            }
        }

        let mut report = ReportSet::new(sizes);
        report.set_per_iteration_unit(per_iteration_unit(max_estimate as f64));

        // Timed runs. A label's points reach the report only once the whole
        // label succeeded, so a skipped label never leaves partial output.
        let mut failures = Vec::new();
        for (label, entries, failure) in groups.iter_mut() {
            let mut points = Vec::with_capacity(entries.len());
            for entry in entries.iter_mut() {
                if failure.is_none() {
                    pb.set_message(format!("running {} @ {}", label, entry.size()));
                    match entry.run() {
                        Ok(elapsed) => {
                            points.push((entry.size(), throughput(entry.iterations(), elapsed)));
                        }
                        Err(err) => match self.policy {
                            ErrorPolicy::Abort => {
                                pb.abandon_with_message("aborted");
                                return Err(err.into());
                            }
                            ErrorPolicy::SkipLabel => *failure = Some(err),
                        },
                    }
                }
                pb.inc(1);
            }
            match failure.take() {
                Some(err) => failures.push(err),
                None => {
                    for (size, value) in points {
                        report.record(label, size, value)?;
                    }
                }
            }
        }
        pb.finish_with_message("Complete");

        self.write_outputs(&report)?;
        Ok(RunOutcome { report, failures })
    }

    fn write_outputs(&self, report: &ReportSet) -> Result<(), RunError> {
        if let Some(path) = &self.json_path {
            std::fs::write(path, generate_json_report(report)?)?;
        }
        if let Some(path) = &self.csv_path {
            std::fs::write(path, generate_csv_report(report))?;
        }
        if let Some(path) = &self.chart_path {
            let meta = ReportMeta::new(self.warmup, self.time);
            let document = chart_document(report, meta, self.compare)?;
            std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
        }
        Ok(())
    }
}
