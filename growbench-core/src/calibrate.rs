//! Iteration Calibration
//!
//! Before the timed run, each entry executes a short warm-up pass to expose
//! its per-call cost. The calibrator turns that estimate into an iteration
//! count sized so the timed batch approximates a fixed target duration,
//! independently per entry since action costs vary wildly by size.

use crate::entry::{ExecutionError, Runnable};
use std::time::Duration;

/// Default warm-up budget per entry.
pub const DEFAULT_WARMUP_DURATION: Duration = Duration::from_secs(1);

/// Default target duration for the calibrated timed run.
pub const DEFAULT_TARGET_DURATION: Duration = Duration::from_secs(1);

/// Display granularity for throughput values: the power of ten at or above
/// the largest calibrated iteration count across all entries. Purely a
/// unit-selection heuristic; measurements are never altered by it.
pub fn per_iteration_unit(max_estimate: f64) -> f64 {
    if max_estimate <= 1.0 || !max_estimate.is_finite() {
        return 1.0;
    }
    10f64.powi(max_estimate.log10().ceil() as i32)
}

/// Calibration results for a batch of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSummary {
    /// Calibrated iteration count per entry, in entry order.
    pub iterations: Vec<u64>,
    /// Shared reporting granularity derived from the largest count.
    pub per_iteration_unit: f64,
}

/// Derives per-entry iteration counts from warm-up passes.
#[derive(Debug, Clone, Copy)]
pub struct Calibrator {
    warmup: Duration,
    target: Duration,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(DEFAULT_WARMUP_DURATION, DEFAULT_TARGET_DURATION)
    }
}

impl Calibrator {
    /// Create a calibrator with the given warm-up budget and timed-run
    /// target duration.
    pub fn new(warmup: Duration, target: Duration) -> Self {
        Self { warmup, target }
    }

    /// Warm-up budget per entry.
    pub fn warmup_duration(&self) -> Duration {
        self.warmup
    }

    /// Target duration for the calibrated timed run.
    pub fn target_duration(&self) -> Duration {
        self.target
    }

    /// Warm up one entry and store its calibrated iteration count. Returns
    /// the count. Sub-resolution warm-up measurements clamp to a positive
    /// per-call cost, so the count is always at least 1.
    pub fn calibrate<R: Runnable + ?Sized>(&self, entry: &mut R) -> Result<u64, ExecutionError> {
        let stats = entry.warmup(self.warmup)?;
        let per_call = stats.per_call().as_secs_f64();
        let iterations = (self.target.as_secs_f64() / per_call).round().max(1.0) as u64;
        entry.set_iterations(iterations);
        Ok(iterations)
    }

    /// Calibrate every entry, then derive the shared reporting granularity
    /// from the largest iteration count observed. Aborts on the first
    /// failing entry; callers wanting a skip policy calibrate entries
    /// individually.
    pub fn calibrate_all<R: Runnable>(
        &self,
        entries: &mut [R],
    ) -> Result<CalibrationSummary, ExecutionError> {
        let mut iterations = Vec::with_capacity(entries.len());
        for entry in entries.iter_mut() {
            iterations.push(self.calibrate(entry)?);
        }
        let max = iterations.iter().copied().max().unwrap_or(1);
        Ok(CalibrationSummary {
            iterations,
            per_iteration_unit: per_iteration_unit(max as f64),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::TimedTask;

    #[test]
    fn test_calibrate_targets_duration() {
        let mut task = TimedTask::new("sleepy", || {
            std::thread::sleep(Duration::from_millis(10));
        });

        let calibrator = Calibrator::new(Duration::from_millis(50), Duration::from_millis(100));
        let iterations = calibrator.calibrate(&mut task).unwrap();

        // ~10ms per call against a 100ms target lands near 10 iterations.
        assert!((5..=15).contains(&iterations), "got {iterations}");
        assert_eq!(task.iterations(), iterations);
    }

    #[test]
    fn test_fast_action_gets_positive_count() {
        let mut task = TimedTask::new("noop", || {});
        let calibrator = Calibrator::new(Duration::from_millis(5), Duration::from_millis(5));
        let iterations = calibrator.calibrate(&mut task).unwrap();
        assert!(iterations >= 1);
    }

    #[test]
    fn test_calibrate_all_summarizes_unit() {
        let mut tasks: Vec<TimedTask<Box<dyn FnMut()>>> = vec![
            TimedTask::new(
                "fast",
                Box::new(|| {
                    std::hint::black_box(1u64 + 1);
                }),
            ),
            TimedTask::new(
                "slow",
                Box::new(|| {
                    std::thread::sleep(Duration::from_millis(5));
                }),
            ),
        ];

        let calibrator = Calibrator::new(Duration::from_millis(20), Duration::from_millis(20));
        let summary = calibrator.calibrate_all(&mut tasks).unwrap();

        assert_eq!(summary.iterations.len(), 2);
        let max = *summary.iterations.iter().max().unwrap();
        assert_eq!(summary.per_iteration_unit, per_iteration_unit(max as f64));
        // The fast task dominates the unit and needs far more iterations.
        assert!(summary.iterations[0] > summary.iterations[1]);
    }

    #[test]
    fn test_calibrate_all_propagates_failure() {
        let mut tasks = vec![TimedTask::new("boom", || panic!("warm-up failure"))];
        let calibrator = Calibrator::new(Duration::from_millis(5), Duration::from_millis(5));
        let err = calibrator.calibrate_all(&mut tasks).unwrap_err();
        assert_eq!(err.label, "boom");
        assert!(err.message.contains("warm-up failure"));
    }

    #[test]
    fn test_per_iteration_unit_rounds_up_to_power_of_ten() {
        assert_eq!(per_iteration_unit(7.0), 10.0);
        assert_eq!(per_iteration_unit(10.0), 10.0);
        assert_eq!(per_iteration_unit(11.0), 100.0);
        assert_eq!(per_iteration_unit(95_000.0), 100_000.0);
    }

    #[test]
    fn test_per_iteration_unit_degenerate_inputs() {
        assert_eq!(per_iteration_unit(0.0), 1.0);
        assert_eq!(per_iteration_unit(1.0), 1.0);
        assert_eq!(per_iteration_unit(-3.0), 1.0);
        assert_eq!(per_iteration_unit(f64::NAN), 1.0);
    }
}
