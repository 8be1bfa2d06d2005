//! Size Sequences
//!
//! Produces the ordered input sizes a benchmark run measures at, from either
//! an arithmetic rule (start, step, count) or a caller-supplied incrementor
//! function. The sequence is computed once at configuration time and is
//! immutable for the whole run.

use thiserror::Error;

/// Magnitude parameter of a generated test input. Always positive.
pub type Size = usize;

/// Default number of sizes in a sequence.
pub const DEFAULT_STEPS: usize = 5;
/// Default smallest size.
pub const DEFAULT_MIN_SIZE: Size = 100;
/// Default distance between consecutive arithmetic sizes.
pub const DEFAULT_STEP_SIZE: Size = 100;

/// Errors from size-sequence construction. All of these fail at definition
/// time, before any timing occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `steps` must be at least 1.
    #[error("steps must be at least 1, got {0}")]
    InvalidSteps(usize),
    /// A produced size was zero; sizes are positive by definition.
    #[error("size at step {step} is zero; sizes must be positive")]
    ZeroSize {
        /// One-based step index that produced the zero size.
        step: usize,
    },
    /// The same size appeared twice, which would make per-size report slots
    /// ambiguous.
    #[error("size {size} appears more than once in the sequence")]
    DuplicateSize {
        /// The repeated size.
        size: Size,
    },
}

/// The ordered, immutable sequence of sizes for one benchmark run.
///
/// Every label is measured at every size in the sequence, in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSequence {
    sizes: Vec<Size>,
}

impl SizeSequence {
    /// Build an arithmetic sequence: `min_size + step_size * (i - 1)` for
    /// `i` in `1..=steps`. The defaults (5 steps of 100 starting at 100)
    /// yield `[100, 200, 300, 400, 500]`.
    pub fn arithmetic(steps: usize, min_size: Size, step_size: Size) -> Result<Self, ConfigError> {
        if steps < 1 {
            return Err(ConfigError::InvalidSteps(steps));
        }
        Self::validate((1..=steps).map(|i| min_size + step_size * (i - 1)).collect())
    }

    /// Build a sequence from a custom incrementor: `[f(1), ..., f(steps)]`.
    pub fn from_incrementor(
        steps: usize,
        incrementor: impl Fn(usize) -> Size,
    ) -> Result<Self, ConfigError> {
        if steps < 1 {
            return Err(ConfigError::InvalidSteps(steps));
        }
        Self::validate((1..=steps).map(incrementor).collect())
    }

    fn validate(sizes: Vec<Size>) -> Result<Self, ConfigError> {
        for (idx, &size) in sizes.iter().enumerate() {
            if size == 0 {
                return Err(ConfigError::ZeroSize { step: idx + 1 });
            }
            if sizes[..idx].contains(&size) {
                return Err(ConfigError::DuplicateSize { size });
            }
        }
        Ok(Self { sizes })
    }

    /// The sizes in measurement order.
    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    /// Number of sizes in the sequence.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the sequence is empty. Construction guarantees at least one
    /// size, so this only returns true for a consumed-and-rebuilt sequence.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Position of `size` within the sequence, if present.
    pub fn position(&self, size: Size) -> Option<usize> {
        self.sizes.iter().position(|&s| s == size)
    }
}
