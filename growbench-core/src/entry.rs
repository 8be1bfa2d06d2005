//! Timed Entries
//!
//! A timed unit warms up to expose its per-call cost, receives a calibrated
//! iteration count, then executes its action that many times back-to-back
//! with nothing but a loop counter between calls. Two variants implement the
//! [`Runnable`] contract: [`TimedTask`] measures a bare action, and
//! [`TimedEntry`] additionally threads a generated input and its size into
//! the action.

use crate::measure::Timer;
use crate::sizes::Size;
use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

/// Smallest elapsed time used as a division denominator. Sub-resolution
/// measurements clamp to this instead of dividing by zero.
const MIN_ELAPSED: Duration = Duration::from_nanos(1);

/// Iterations completed per second for a batch of `iterations` calls that
/// took `elapsed` in total. A zero elapsed time is clamped to 1ns, so
/// legitimately tiny operations report a finite "infinite-fast" value
/// rather than raising.
pub fn throughput(iterations: u64, elapsed: Duration) -> f64 {
    iterations as f64 / elapsed.max(MIN_ELAPSED).as_secs_f64()
}

/// Render a panic payload as text for error reporting.
pub fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Failure of a user action during warm-up or a timed run.
#[derive(Debug, Clone, thiserror::Error)]
pub struct ExecutionError {
    /// Label of the failing unit.
    pub label: String,
    /// Input size, for size-aware units.
    pub size: Option<Size>,
    /// Zero-based index of the failing call within its batch.
    pub iteration: u64,
    /// Panic payload rendered as text.
    pub message: String,
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(
                f,
                "action '{}' failed at size {} (iteration {}): {}",
                self.label, size, self.iteration, self.message
            ),
            None => write!(
                f,
                "action '{}' failed (iteration {}): {}",
                self.label, self.iteration, self.message
            ),
        }
    }
}

/// Outcome of one warm-up pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupStats {
    /// Number of calls completed within the warm-up budget. At least 1.
    pub calls: u64,
    /// Total elapsed wall-clock time for those calls.
    pub elapsed: Duration,
}

impl WarmupStats {
    /// Estimated cost of a single call. Sub-resolution measurements clamp
    /// to 1ns so downstream division stays defined.
    pub fn per_call(&self) -> Duration {
        let avg = self.elapsed.as_secs_f64() / self.calls.max(1) as f64;
        Duration::from_secs_f64(avg).max(MIN_ELAPSED)
    }
}

/// A benchmark unit that can warm up, then execute one calibrated timed run.
pub trait Runnable {
    /// Label identifying this unit in reports.
    fn label(&self) -> &str;

    /// Input size, for size-aware variants.
    fn input_size(&self) -> Option<Size>;

    /// Run the action repeatedly within `budget` to estimate per-call cost.
    /// Always completes at least one call.
    fn warmup(&mut self, budget: Duration) -> Result<WarmupStats, ExecutionError>;

    /// Calibrated iteration count for the timed run. Always positive.
    fn iterations(&self) -> u64;

    /// Set the calibrated iteration count. Called once, by the calibrator;
    /// values below 1 are clamped to 1.
    fn set_iterations(&mut self, iterations: u64);

    /// Execute the action exactly `iterations()` times back-to-back and
    /// return the total wall-clock elapsed time for the batch.
    fn run(&mut self) -> Result<Duration, ExecutionError>;
}

/// Delegate through boxes so heterogeneous units can share a collection.
impl<R: Runnable + ?Sized> Runnable for Box<R> {
    fn label(&self) -> &str {
        (**self).label()
    }
    fn input_size(&self) -> Option<Size> {
        (**self).input_size()
    }
    fn warmup(&mut self, budget: Duration) -> Result<WarmupStats, ExecutionError> {
        (**self).warmup(budget)
    }
    fn iterations(&self) -> u64 {
        (**self).iterations()
    }
    fn set_iterations(&mut self, iterations: u64) {
        (**self).set_iterations(iterations)
    }
    fn run(&mut self) -> Result<Duration, ExecutionError> {
        (**self).run()
    }
}

/// Run `call` exactly `times` times, catching panics so the failing
/// iteration index survives into the error.
fn run_batch(
    label: &str,
    size: Option<Size>,
    times: u64,
    mut call: impl FnMut(),
) -> Result<Duration, ExecutionError> {
    let mut completed = 0u64;
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let timer = Timer::start();
        while completed < times {
            call();
            completed += 1;
        }
        timer.stop()
    }));

    outcome.map_err(|panic| ExecutionError {
        label: label.to_string(),
        size,
        iteration: completed,
        message: panic_message(panic),
    })
}

/// Run `call` repeatedly until `budget` elapses, at least once.
fn run_warmup(
    label: &str,
    size: Option<Size>,
    budget: Duration,
    mut call: impl FnMut(),
) -> Result<WarmupStats, ExecutionError> {
    let mut calls = 0u64;
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let timer = Timer::start();
        loop {
            call();
            calls += 1;
            let elapsed = timer.stop();
            if elapsed >= budget {
                return elapsed;
            }
        }
    }));

    match outcome {
        Ok(elapsed) => Ok(WarmupStats { calls, elapsed }),
        Err(panic) => Err(ExecutionError {
            label: label.to_string(),
            size,
            iteration: calls,
            message: panic_message(panic),
        }),
    }
}

/// Plain timed unit measuring a no-argument action.
#[derive(Debug)]
pub struct TimedTask<F> {
    label: String,
    action: F,
    iterations: u64,
}

impl<F: FnMut()> TimedTask<F> {
    /// Create a task around a bare action.
    pub fn new(label: impl Into<String>, action: F) -> Self {
        Self {
            label: label.into(),
            action,
            iterations: 1,
        }
    }
}

impl<F: FnMut()> Runnable for TimedTask<F> {
    fn label(&self) -> &str {
        &self.label
    }

    fn input_size(&self) -> Option<Size> {
        None
    }

    fn warmup(&mut self, budget: Duration) -> Result<WarmupStats, ExecutionError> {
        run_warmup(&self.label, None, budget, &mut self.action)
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn set_iterations(&mut self, iterations: u64) {
        self.iterations = iterations.max(1);
    }

    fn run(&mut self) -> Result<Duration, ExecutionError> {
        run_batch(&self.label, None, self.iterations, &mut self.action)
    }
}

/// Size-aware timed unit: owns the generated input for one (label, size)
/// pair and threads `(&input, size)` into the action on every call.
pub struct TimedEntry<G, F> {
    label: String,
    size: Size,
    // Can be arbitrarily large; owned exclusively by this entry, never
    // serialized, and omitted from Debug output.
    input: G,
    action: F,
    iterations: u64,
}

impl<G, F: FnMut(&G, Size)> TimedEntry<G, F> {
    /// Create an entry around a generated input and a two-argument action.
    pub fn new(label: impl Into<String>, size: Size, input: G, action: F) -> Self {
        Self {
            label: label.into(),
            size,
            input,
            action,
            iterations: 1,
        }
    }

    /// The input size this entry measures at.
    pub fn size(&self) -> Size {
        self.size
    }
}

impl<G, F> fmt::Debug for TimedEntry<G, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedEntry")
            .field("label", &self.label)
            .field("size", &self.size)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl<G, F: FnMut(&G, Size)> Runnable for TimedEntry<G, F> {
    fn label(&self) -> &str {
        &self.label
    }

    fn input_size(&self) -> Option<Size> {
        Some(self.size)
    }

    fn warmup(&mut self, budget: Duration) -> Result<WarmupStats, ExecutionError> {
        let action = &mut self.action;
        let input = &self.input;
        let size = self.size;
        run_warmup(&self.label, Some(size), budget, || action(input, size))
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn set_iterations(&mut self, iterations: u64) {
        self.iterations = iterations.max(1);
    }

    fn run(&mut self) -> Result<Duration, ExecutionError> {
        let action = &mut self.action;
        let input = &self.input;
        let size = self.size;
        run_batch(&self.label, Some(size), self.iterations, || {
            action(input, size)
        })
    }
}
