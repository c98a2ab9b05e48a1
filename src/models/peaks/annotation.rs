use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::peak_record::PeakRecord;
use crate::errors::Result;
use crate::models::aggregators::AggregatedSeries;
use crate::traits::peak_detector::PeakDetector;

/// Labels sit this many times below the apex they belong to.
pub const ANNOTATION_HEIGHT_DIVISOR: f64 = 2.5;

/// A text label placed on the plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub label: String,
    /// Peak center in scan units, whatever the display mode.
    pub x: f64,
    pub y: f64,
    pub tooltip: String,
}

impl From<&PeakRecord> for AnnotationRecord {
    fn from(peak: &PeakRecord) -> Self {
        Self {
            label: format!("R={:.1}", peak.resolving_power),
            x: peak.center,
            y: peak.intensity / ANNOTATION_HEIGHT_DIVISOR,
            tooltip: peak.to_string(),
        }
    }
}

/// What happens to the current annotations when peak detection fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationFailurePolicy {
    /// Keep showing the previous annotations.
    #[default]
    PreserveOnFailure,
    /// Drop them, leaving an empty overlay.
    ClearOnFailure,
}

/// Runs peak detection over the TIC and keeps the resulting labels.
#[derive(Debug, Clone)]
pub struct PeakAnnotationEngine<D> {
    detector: D,
    policy: AnnotationFailurePolicy,
    annotations: Vec<AnnotationRecord>,
}

impl<D: PeakDetector> PeakAnnotationEngine<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            policy: AnnotationFailurePolicy::default(),
            annotations: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: AnnotationFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AnnotationFailurePolicy {
        self.policy
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn annotations(&self) -> &[AnnotationRecord] {
        &self.annotations
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    /// Detects peaks over `0..full_scan_count` and replaces the
    /// annotation set with one label per peak.
    ///
    /// Scans missing from `series` are passed to the detector as zeros.
    /// On error the annotations are kept or cleared according to
    /// the failure policy and the error is returned.
    #[instrument(skip(self, series), level = "debug")]
    pub fn find_peaks(
        &mut self,
        series: &AggregatedSeries,
        full_scan_count: usize,
    ) -> Result<&[AnnotationRecord]> {
        let dense = series.dense_fill(full_scan_count);
        let peaks = match self.detector.find_peaks(&dense) {
            Ok(peaks) => peaks,
            Err(e) => {
                warn!("Peak detection failed: {}", e);
                if self.policy == AnnotationFailurePolicy::ClearOnFailure {
                    self.annotations.clear();
                }
                return Err(e);
            }
        };
        debug!("Found {} peaks", peaks.len());

        self.annotations = peaks.iter().map(AnnotationRecord::from).collect();
        Ok(&self.annotations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PeakDetectionError;
    use std::cell::RefCell;

    fn fixed_peaks(_series: &[(f64, f64)]) -> Result<Vec<PeakRecord>> {
        Ok(vec![PeakRecord::new(120.0, 5000.0, 37.42)])
    }

    fn failing(_series: &[(f64, f64)]) -> Result<Vec<PeakRecord>> {
        Err(PeakDetectionError::NonFiniteIntensity { position: 3 }.into())
    }

    #[test]
    fn test_annotation_from_peak() {
        let annotation = AnnotationRecord::from(&PeakRecord::new(120.0, 5000.0, 37.42));
        assert_eq!(annotation.label, "R=37.4");
        assert_eq!(annotation.x, 120.0);
        assert_eq!(annotation.y, 2000.0);
        assert!(annotation.tooltip.contains("Resolving Power: 37.42"));
    }

    #[test]
    fn test_detector_gets_dense_series() {
        let seen: RefCell<Vec<(f64, f64)>> = RefCell::new(Vec::new());
        let detector = |series: &[(f64, f64)]| -> Result<Vec<PeakRecord>> {
            seen.borrow_mut().extend_from_slice(series);
            Ok(Vec::new())
        };
        let mut engine = PeakAnnotationEngine::new(detector);
        let series: AggregatedSeries = vec![(2, 5.0), (3, 6.0)].into_iter().collect();
        engine.find_peaks(&series, 6).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                (0.0, 0.0),
                (1.0, 0.0),
                (2.0, 5.0),
                (3.0, 6.0),
                (4.0, 0.0),
                (5.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_annotations_are_replaced() {
        let mut engine = PeakAnnotationEngine::new(fixed_peaks);
        let series = AggregatedSeries::default();
        engine.find_peaks(&series, 10).unwrap();
        engine.find_peaks(&series, 10).unwrap();
        assert_eq!(engine.annotations().len(), 1);
    }

    #[test]
    fn test_failure_preserves_previous_annotations() {
        let series = AggregatedSeries::default();
        let mut engine = PeakAnnotationEngine::new(fixed_peaks);
        engine.find_peaks(&series, 10).unwrap();

        let mut engine = PeakAnnotationEngine {
            detector: failing,
            policy: AnnotationFailurePolicy::PreserveOnFailure,
            annotations: engine.annotations().to_vec(),
        };
        assert!(engine.find_peaks(&series, 10).is_err());
        assert_eq!(engine.annotations().len(), 1);
    }

    #[test]
    fn test_failure_clears_when_asked() {
        let series = AggregatedSeries::default();
        let mut engine = PeakAnnotationEngine {
            detector: failing,
            policy: AnnotationFailurePolicy::ClearOnFailure,
            annotations: vec![AnnotationRecord::from(&PeakRecord::new(1.0, 1.0, 1.0))],
        };
        assert!(engine.find_peaks(&series, 10).is_err());
        assert!(engine.annotations().is_empty());
    }
}
