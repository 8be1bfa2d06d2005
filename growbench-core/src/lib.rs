#![warn(missing_docs)]
//! Growbench Core - Measurement Engine
//!
//! This crate provides the measurement half of growbench:
//! - `SizeSequence` for the ordered input sizes a run measures at
//! - `Runnable` timed units (`TimedTask` plain, `TimedEntry` size-aware)
//! - `Calibrator` deriving per-entry iteration counts from warm-up passes
//! - Wall-clock `Timer` used by the batched runs

mod calibrate;
mod entry;
mod measure;
mod sizes;

pub use calibrate::{
    Calibrator, CalibrationSummary, DEFAULT_TARGET_DURATION, DEFAULT_WARMUP_DURATION,
    per_iteration_unit,
};
pub use entry::{
    ExecutionError, Runnable, TimedEntry, TimedTask, WarmupStats, panic_message, throughput,
};
pub use measure::Timer;
pub use sizes::{
    ConfigError, DEFAULT_MIN_SIZE, DEFAULT_STEPS, DEFAULT_STEP_SIZE, Size, SizeSequence,
};
