//! Report Data Structures
//!
//! Aggregates per-entry throughput samples into per-label series. Points are
//! stored in slots keyed by the global size sequence, so entries may complete
//! in any order without corrupting output order. Labels keep their first-seen
//! position since export formats display them in definition order.

use fxhash::FxHashMap;
use growbench_core::{Size, SizeSequence};
use thiserror::Error;

/// Errors from recording throughput samples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The size is not part of the run's size sequence, so there is no slot
    /// to place the sample in.
    #[error("size {size} is not in the configured size sequence")]
    UnknownSize {
        /// The unplaceable size.
        size: Size,
    },
    /// A sample for this (label, size) pair was already recorded.
    #[error("sample for '{label}' at size {size} recorded twice")]
    DuplicatePoint {
        /// Label of the repeated sample.
        label: String,
        /// Size of the repeated sample.
        size: Size,
    },
}

/// Ordered throughput samples for one label, one slot per size in the
/// run's sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    points: Vec<(Size, Option<f64>)>,
}

impl Series {
    fn new(label: String, sizes: &[Size]) -> Self {
        Self {
            label,
            points: sizes.iter().map(|&s| (s, None)).collect(),
        }
    }

    /// Label this series belongs to.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Throughput at `size`, if recorded.
    pub fn get(&self, size: Size) -> Option<f64> {
        self.points
            .iter()
            .find(|(s, _)| *s == size)
            .and_then(|(_, v)| *v)
    }

    /// Recorded points in size-sequence order. Unfilled slots are skipped.
    pub fn points(&self) -> impl Iterator<Item = (Size, f64)> + '_ {
        self.points.iter().filter_map(|(s, v)| v.map(|v| (*s, v)))
    }

    /// Whether every size slot holds a sample.
    pub fn is_complete(&self) -> bool {
        self.points.iter().all(|(_, v)| v.is_some())
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Whether no points have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// All measured series of one run, keyed by label in first-record order.
///
/// Append-only while the run executes; the orchestrator hands it to user
/// code by value once the run completes.
#[derive(Debug, Clone)]
pub struct ReportSet {
    sizes: SizeSequence,
    labels: Vec<String>,
    index: FxHashMap<String, usize>,
    series: Vec<Series>,
    per_iteration_unit: f64,
}

impl ReportSet {
    /// Create an empty report over the run's size sequence.
    pub fn new(sizes: SizeSequence) -> Self {
        Self {
            sizes,
            labels: Vec::new(),
            index: FxHashMap::default(),
            series: Vec::new(),
            per_iteration_unit: 1.0,
        }
    }

    /// Record one throughput sample. The first record for a label fixes its
    /// position; within a label the sample lands in its size slot no matter
    /// when it arrives.
    pub fn record(
        &mut self,
        label: &str,
        size: Size,
        throughput: f64,
    ) -> Result<(), ReportError> {
        let slot = self
            .sizes
            .position(size)
            .ok_or(ReportError::UnknownSize { size })?;

        let idx = match self.index.get(label) {
            Some(&idx) => idx,
            None => {
                let idx = self.series.len();
                self.labels.push(label.to_string());
                self.index.insert(label.to_string(), idx);
                self.series.push(Series::new(label.to_string(), self.sizes.sizes()));
                idx
            }
        };

        let point = &mut self.series[idx].points[slot];
        if point.1.is_some() {
            return Err(ReportError::DuplicatePoint {
                label: label.to_string(),
                size,
            });
        }
        point.1 = Some(throughput);
        Ok(())
    }

    /// Labels in first-record order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Series for `label`, if any sample was recorded for it.
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.index.get(label).map(|&idx| &self.series[idx])
    }

    /// All series in label order.
    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// The run's size sequence.
    pub fn sizes(&self) -> &[Size] {
        self.sizes.sizes()
    }

    /// Display granularity for throughput values. 1.0 until calibration
    /// derives a shared unit.
    pub fn per_iteration_unit(&self) -> f64 {
        self.per_iteration_unit
    }

    /// Set the display granularity. Does not alter recorded values.
    pub fn set_per_iteration_unit(&mut self, unit: f64) {
        self.per_iteration_unit = unit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(steps: usize, min: Size, step: Size) -> SizeSequence {
        SizeSequence::arithmetic(steps, min, step).unwrap()
    }

    #[test]
    fn test_points_follow_size_sequence_not_completion_order() {
        let mut report = ReportSet::new(sequence(3, 50, 200));

        // Entries finish out of order.
        report.record("scan", 450, 1.0).unwrap();
        report.record("scan", 50, 3.0).unwrap();
        report.record("scan", 250, 2.0).unwrap();

        let series = report.series("scan").unwrap();
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(50, 3.0), (250, 2.0), (450, 1.0)]);
    }

    #[test]
    fn test_labels_keep_first_record_order() {
        let mut report = ReportSet::new(sequence(2, 100, 100));
        report.record("zeta", 100, 1.0).unwrap();
        report.record("alpha", 100, 2.0).unwrap();
        report.record("zeta", 200, 3.0).unwrap();

        assert_eq!(report.labels(), &["zeta".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn test_every_label_gets_full_slot_count() {
        let mut report = ReportSet::new(sequence(3, 100, 100));
        report.record("a", 200, 1.0).unwrap();

        let series = report.series("a").unwrap();
        assert!(!series.is_complete());
        assert_eq!(series.len(), 1);

        report.record("a", 100, 2.0).unwrap();
        report.record("a", 300, 3.0).unwrap();
        assert!(report.series("a").unwrap().is_complete());
        assert_eq!(report.series("a").unwrap().len(), report.sizes().len());
    }

    #[test]
    fn test_unknown_size_rejected() {
        let mut report = ReportSet::new(sequence(2, 100, 100));
        assert_eq!(
            report.record("a", 150, 1.0),
            Err(ReportError::UnknownSize { size: 150 })
        );
    }

    #[test]
    fn test_duplicate_point_rejected() {
        let mut report = ReportSet::new(sequence(2, 100, 100));
        report.record("a", 100, 1.0).unwrap();
        assert_eq!(
            report.record("a", 100, 2.0),
            Err(ReportError::DuplicatePoint {
                label: "a".to_string(),
                size: 100,
            })
        );
        // The original value stays.
        assert_eq!(report.series("a").unwrap().get(100), Some(1.0));
    }

    #[test]
    fn test_per_iteration_unit_defaults_to_one() {
        let mut report = ReportSet::new(sequence(2, 100, 100));
        assert_eq!(report.per_iteration_unit(), 1.0);
        report.set_per_iteration_unit(1000.0);
        assert_eq!(report.per_iteration_unit(), 1000.0);
    }
}
