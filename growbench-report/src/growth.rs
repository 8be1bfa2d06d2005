//! Growth Reference Curves
//!
//! Synthesizes the four canonical complexity curves (log n, n, n log n, n²)
//! from a single measured sample, across the same size domain as the real
//! data. All five curves coincide at the anchor point, so divergence at the
//! other sizes shows which growth class the measurement resembles. This is a
//! visual aid, not a statistical fit.

use crate::report::Series;
use growbench_core::Size;
use serde::Serialize;
use thiserror::Error;

/// Errors from comparison-curve synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// No sizes to synthesize over.
    #[error("size domain is empty")]
    EmptyDomain,
    /// The domain offers no anchor: its only size is 1, whose log is zero.
    #[error("no usable anchor size (log10(1) = 0 cannot scale the reference curves)")]
    NoUsableAnchor,
    /// The measured series has no sample at a requested size.
    #[error("series has no sample at size {size}")]
    MissingSample {
        /// The unsampled size.
        size: Size,
    },
}

/// One of the four canonical complexity classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GrowthClass {
    /// O(log n)
    LogN,
    /// O(n)
    N,
    /// O(n log n)
    NLogN,
    /// O(n²)
    NSquared,
}

impl GrowthClass {
    /// All classes, in display order.
    pub const ALL: [GrowthClass; 4] = [
        GrowthClass::LogN,
        GrowthClass::N,
        GrowthClass::NLogN,
        GrowthClass::NSquared,
    ];

    /// Series name used in chart and record output.
    pub fn name(self) -> &'static str {
        match self {
            GrowthClass::LogN => "log n",
            GrowthClass::N => "n",
            GrowthClass::NLogN => "n log n",
            GrowthClass::NSquared => "n_sq",
        }
    }

    /// The class's shape function, evaluated at `n`.
    fn value_at(self, n: f64) -> f64 {
        match self {
            GrowthClass::LogN => n.log10(),
            GrowthClass::N => n,
            GrowthClass::NLogN => n * n.log10(),
            GrowthClass::NSquared => n * n,
        }
    }
}

/// A synthesized reference curve over the run's size domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSeries {
    /// Which class this curve represents.
    pub class: GrowthClass,
    /// Curve values in size-sequence order.
    pub points: Vec<(Size, f64)>,
}

/// One label's measured series plus its four reference curves. Computed on
/// demand; never outlives the report it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBundle {
    /// Label of the measured series.
    pub label: String,
    /// The measured points, restricted to the requested domain.
    pub measured: Vec<(Size, f64)>,
    /// The four synthetic curves, in [`GrowthClass::ALL`] order.
    pub references: Vec<ReferenceSeries>,
    /// The anchor size every curve was scaled at.
    pub anchor: Size,
}

/// Pick the anchor size: the first in the domain unless it equals 1, in
/// which case the second.
pub fn anchor_size(sizes: &[Size]) -> Result<Size, GrowthError> {
    match sizes {
        [] => Err(GrowthError::EmptyDomain),
        [first, ..] if *first != 1 => Ok(*first),
        [_, second, ..] => Ok(*second),
        _ => Err(GrowthError::NoUsableAnchor),
    }
}

/// Synthesize the four reference curves for `series` over `sizes`.
///
/// Each curve is scaled by a single factor derived from the measured value
/// at the anchor, so all five series agree there exactly. A zero anchor
/// value propagates flat zero curves, which is valid output.
pub fn compare(series: &Series, sizes: &[Size]) -> Result<ComparisonBundle, GrowthError> {
    let anchor = anchor_size(sizes)?;
    let y0 = series
        .get(anchor)
        .ok_or(GrowthError::MissingSample { size: anchor })?;

    let mut measured = Vec::with_capacity(sizes.len());
    for &size in sizes {
        let value = series
            .get(size)
            .ok_or(GrowthError::MissingSample { size })?;
        measured.push((size, value));
    }

    let references = GrowthClass::ALL
        .iter()
        .map(|&class| {
            let scale = y0 / class.value_at(anchor as f64);
            ReferenceSeries {
                class,
                points: sizes
                    .iter()
                    .map(|&n| (n, class.value_at(n as f64) * scale))
                    .collect(),
            }
        })
        .collect();

    Ok(ComparisonBundle {
        label: series.label().to_string(),
        measured,
        references,
        anchor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportSet;
    use growbench_core::SizeSequence;

    fn report_with(label: &str, points: &[(Size, f64)]) -> ReportSet {
        let sizes: Vec<Size> = points.iter().map(|(s, _)| *s).collect();
        let steps = sizes.len();
        let seq = SizeSequence::from_incrementor(steps, |i| sizes[i - 1]).unwrap();
        let mut report = ReportSet::new(seq);
        for &(size, value) in points {
            report.record(label, size, value).unwrap();
        }
        report
    }

    #[test]
    fn test_all_five_series_agree_at_anchor() {
        let report = report_with("op", &[(100, 40.0), (200, 18.0), (300, 11.0)]);
        let series = report.series("op").unwrap();
        let bundle = compare(series, report.sizes()).unwrap();

        assert_eq!(bundle.anchor, 100);
        assert_eq!(bundle.measured[0], (100, 40.0));
        for reference in &bundle.references {
            let (size, value) = reference.points[0];
            assert_eq!(size, 100);
            assert!(
                (value - 40.0).abs() < 1e-9,
                "{} diverges at anchor: {value}",
                reference.class.name()
            );
        }
    }

    #[test]
    fn test_curve_shapes() {
        let report = report_with("op", &[(10, 100.0), (100, 50.0)]);
        let series = report.series("op").unwrap();
        let bundle = compare(series, report.sizes()).unwrap();

        // At n=100 with anchor 10 and y0=100:
        // log n: 100 * log10(100)/log10(10) = 200
        // n:     100 * 100/10 = 1000
        // n log n: 100 * (100*2)/(10*1) = 2000
        // n²:    100 * 10000/100 = 10000
        let at = |class: GrowthClass| {
            bundle
                .references
                .iter()
                .find(|r| r.class == class)
                .unwrap()
                .points[1]
                .1
        };
        assert!((at(GrowthClass::LogN) - 200.0).abs() < 1e-9);
        assert!((at(GrowthClass::N) - 1000.0).abs() < 1e-9);
        assert!((at(GrowthClass::NLogN) - 2000.0).abs() < 1e-9);
        assert!((at(GrowthClass::NSquared) - 10000.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_skips_size_one() {
        let report = report_with("op", &[(1, 9.0), (10, 5.0), (100, 2.0)]);
        let series = report.series("op").unwrap();
        let bundle = compare(series, report.sizes()).unwrap();

        assert_eq!(bundle.anchor, 10);
        for reference in &bundle.references {
            assert!((reference.points[1].1 - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_compare_is_idempotent() {
        let report = report_with("op", &[(100, 12.5), (200, 6.25)]);
        let series = report.series("op").unwrap();

        let first = compare(series, report.sizes()).unwrap();
        let second = compare(series, report.sizes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_anchor_yields_flat_zero_curves() {
        let report = report_with("op", &[(100, 0.0), (200, 4.0)]);
        let series = report.series("op").unwrap();
        let bundle = compare(series, report.sizes()).unwrap();

        for reference in &bundle.references {
            assert!(reference.points.iter().all(|&(_, v)| v == 0.0));
        }
    }

    #[test]
    fn test_empty_domain_rejected() {
        let report = report_with("op", &[(100, 1.0)]);
        let series = report.series("op").unwrap();
        assert_eq!(compare(series, &[]), Err(GrowthError::EmptyDomain));
    }

    #[test]
    fn test_single_size_one_has_no_anchor() {
        let report = report_with("op", &[(1, 1.0)]);
        let series = report.series("op").unwrap();
        assert_eq!(
            compare(series, report.sizes()),
            Err(GrowthError::NoUsableAnchor)
        );
    }

    #[test]
    fn test_missing_sample_rejected() {
        let seq = SizeSequence::arithmetic(2, 100, 100).unwrap();
        let mut report = ReportSet::new(seq);
        report.record("op", 100, 1.0).unwrap();

        let series = report.series("op").unwrap();
        assert_eq!(
            compare(series, report.sizes()),
            Err(GrowthError::MissingSample { size: 200 })
        );
    }
}
