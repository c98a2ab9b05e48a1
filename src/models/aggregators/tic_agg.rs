use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

use crate::models::frames::raw_peak::RawPeak;
use crate::models::instrument::TimeCalibration;
use crate::models::scan_range::ScanRange;
use crate::traits::aggregator::Aggregator;
use crate::traits::intensity_frame::IntensityFrame;
use crate::utils::display::{glimpse_vec, GlimpseConfig};

/// Summed intensity per scan index, ordered by scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedSeries {
    scan_tree: BTreeMap<usize, f64>,
}

impl AggregatedSeries {
    pub fn get(&self, scan_index: usize) -> Option<f64> {
        self.scan_tree.get(&scan_index).copied()
    }

    pub fn len(&self) -> usize {
        self.scan_tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scan_tree.is_empty()
    }

    /// `(scan_index, intensity)` pairs in ascending scan order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.scan_tree.iter().map(|(k, v)| (*k, *v))
    }

    pub fn scan_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.scan_tree.keys().copied()
    }

    pub fn clear(&mut self) {
        self.scan_tree.clear();
    }

    /// Spreads the series over `0..full_scan_count`, filling the
    /// scans that were not aggregated with zeros.
    pub fn dense_fill(&self, full_scan_count: usize) -> Vec<(f64, f64)> {
        (0..full_scan_count)
            .map(|i| (i as f64, self.get(i).unwrap_or(0.0)))
            .collect()
    }
}

impl std::fmt::Display for AggregatedSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<(usize, f64)> = self.iter().collect();
        write!(
            f,
            "AggregatedSeries {}",
            glimpse_vec(&pairs, Some(GlimpseConfig::default()))
        )
    }
}

impl FromIterator<(usize, f64)> for AggregatedSeries {
    fn from_iter<T: IntoIterator<Item = (usize, f64)>>(iter: T) -> Self {
        let mut scan_tree = BTreeMap::new();
        for (k, v) in iter {
            *scan_tree.entry(k).or_insert(0.0) += v;
        }
        Self { scan_tree }
    }
}

/// Total ion current over a scan range.
///
/// Every scan of the range gets a key up front, so scans without
/// signal still show up as zeros.
#[derive(Debug, Clone)]
pub struct TicAggregator {
    range: ScanRange,
    scan_tree: BTreeMap<usize, f64>,
}

impl TicAggregator {
    pub fn new(range: ScanRange) -> Self {
        Self {
            range,
            scan_tree: range.iter().map(|i| (i, 0.0)).collect(),
        }
    }
}

impl Aggregator for TicAggregator {
    type Item = RawPeak;
    type Output = AggregatedSeries;

    fn add(&mut self, peak: impl Into<RawPeak>) {
        let peak = peak.into();
        if !self.range.contains(peak.scan_index) {
            return;
        }
        self.scan_tree
            .entry(peak.scan_index)
            .and_modify(|curr| *curr += peak.intensity)
            .or_insert(peak.intensity);
    }

    fn finalize(self) -> AggregatedSeries {
        AggregatedSeries {
            scan_tree: self.scan_tree,
        }
    }
}

/// Collapses frames into a TIC over the selected scan range.
///
/// Holds the range (unset until the first frame arrives), the last
/// calibration and the last result. Every aggregation is a full rebuild.
#[derive(Debug, Clone, Default)]
pub struct ScanAggregator {
    range: Option<ScanRange>,
    time_factor: f64,
    series: AggregatedSeries,
}

impl ScanAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(range: ScanRange) -> Self {
        Self {
            range: Some(range),
            ..Self::default()
        }
    }

    pub fn range(&self) -> Option<ScanRange> {
        self.range
    }

    pub fn set_range(&mut self, range: ScanRange) {
        self.range = Some(range);
    }

    pub fn reset_range(&mut self) {
        self.range = None;
    }

    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }

    pub fn series(&self) -> &AggregatedSeries {
        &self.series
    }

    /// Drops the last result, keeping range and calibration.
    pub fn invalidate(&mut self) {
        self.series.clear();
    }

    /// Re-aggregates `frame` over the current range.
    ///
    /// A missing frame is a no-op that returns `None` and keeps the
    /// previous state. The first frame seen defines the range when none
    /// was set. Scans of the range the frame does not have count as zero.
    #[instrument(skip_all, level = "debug")]
    pub fn aggregate<F: IntensityFrame + ?Sized>(
        &mut self,
        frame: Option<&F>,
        calibration: TimeCalibration,
    ) -> Option<&AggregatedSeries> {
        let frame = frame?;
        self.time_factor = calibration.time_factor();

        let range = *self
            .range
            .get_or_insert_with(|| ScanRange::full(frame.num_scans()));
        if range.end() > frame.num_scans() {
            debug!(
                "Scan range {:?} goes beyond the {} scans of the frame, padding with zeros",
                range,
                frame.num_scans()
            );
        }

        let mut agg = TicAggregator::new(range);
        for scan_index in range.iter() {
            frame.for_each_peak_in_scan(scan_index, &mut |peak| agg.add(peak));
        }
        self.series = agg.finalize();
        trace!("{}", self.series);

        Some(&self.series)
    }
}
