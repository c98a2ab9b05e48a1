use tracing::{debug, info, instrument, trace, warn};

use super::aggregators::{AggregatedSeries, ScanAggregator};
use super::display_mode::{DisplayMode, DisplayModeSelector};
use super::instrument::TimeCalibration;
use super::peaks::{
    AnnotationFailurePolicy, AnnotationRecord, ApexPeakDetector, PeakAnnotationEngine,
};
use super::projection::{DualDomainProjection, ProjectedPoint};
use super::scan_range::ScanRange;
use super::settings::TicSettings;
use crate::errors::Result;
use crate::traits::instrument::InstrumentMetadata;
use crate::traits::intensity_frame::IntensityFrame;
use crate::traits::peak_detector::PeakDetector;
use crate::traits::render_target::RenderTarget;

/// What changed in a [`TicViewModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicChange {
    ReferenceUpdated,
    FrameUpdated,
    RangeChanged(ScanRange),
    DisplayModeChanged(DisplayMode),
    AnnotationsUpdated,
}

type Listener = Box<dyn FnMut(&TicChange)>;

/// Total ion chromatogram of a frame, ready to be drawn.
///
/// Single threaded by design: every call runs to completion and pushes
/// its result to the render target before returning. Hosts either poll
/// [`TicViewModel::generation`] or [`TicViewModel::subscribe`] to changes.
pub struct TicViewModel<M, R, D> {
    metadata: M,
    target: R,
    aggregator: ScanAggregator,
    projection: DualDomainProjection,
    selector: DisplayModeSelector,
    annotation_engine: PeakAnnotationEngine<D>,
    max_scan: usize,
    generation: u64,
    listeners: Vec<Listener>,
}

impl<M, R> TicViewModel<M, R, ApexPeakDetector>
where
    M: InstrumentMetadata,
    R: RenderTarget,
{
    pub fn from_settings(settings: &TicSettings, metadata: M, target: R) -> Self {
        let detector = ApexPeakDetector::new(settings.peak_detection);
        let mut out = Self::new(metadata, target, detector)
            .with_failure_policy(settings.annotation_failure_policy);

        out.selector = DisplayModeSelector::new(settings.display_mode);
        out.target.set_x_axis(&out.selector.axis());

        if let Some((start, end)) = settings.scan_range {
            let limit = out.scan_limit();
            let range = ScanRange::full(limit)
                .with_clamped_end(end, limit)
                .with_clamped_start(start);
            out.aggregator.set_range(range);
        }
        out
    }
}

impl<M, R, D> TicViewModel<M, R, D>
where
    M: InstrumentMetadata,
    R: RenderTarget,
    D: PeakDetector,
{
    pub fn new(metadata: M, mut target: R, detector: D) -> Self {
        let selector = DisplayModeSelector::default();
        target.set_x_axis(&selector.axis());
        Self {
            max_scan: metadata.scan_count(),
            metadata,
            target,
            aggregator: ScanAggregator::new(),
            projection: DualDomainProjection::default(),
            selector,
            annotation_engine: PeakAnnotationEngine::new(detector),
            generation: 0,
            listeners: Vec::new(),
        }
    }

    pub fn with_failure_policy(mut self, policy: AnnotationFailurePolicy) -> Self {
        self.annotation_engine = self.annotation_engine.with_policy(policy);
        self
    }

    /// Registers a callback that is called after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&TicChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, change: TicChange) {
        self.generation += 1;
        trace!("TIC change #{}: {:?}", self.generation, change);
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    /// Swaps the acquisition metadata, the scan maximum follows it and
    /// a range set beforehand is clamped to the new maximum.
    pub fn update_reference(&mut self, metadata: M) {
        self.max_scan = metadata.scan_count();
        self.metadata = metadata;
        self.notify(TicChange::ReferenceUpdated);
        if let Some(range) = self.aggregator.range() {
            let clamped = self.clamp_to_max_scan(range);
            self.apply_range(clamped);
        }
    }

    /// Upper bound for range ends. A zero scan count means the metadata
    /// does not know it yet, it is then taken from the next frame.
    fn scan_limit(&self) -> usize {
        match self.max_scan {
            0 => usize::MAX,
            x => x,
        }
    }

    fn clamp_to_max_scan(&self, range: ScanRange) -> ScanRange {
        let end = i64::try_from(range.end()).unwrap_or(i64::MAX);
        range.with_clamped_end(end, self.scan_limit())
    }

    /// Scans the peak detection runs over: the instrument's when known,
    /// otherwise the ones of the last frame.
    fn full_scan_count(&self) -> usize {
        match self.metadata.scan_count() {
            0 => self.max_scan,
            x => x,
        }
    }

    /// Rebuilds the TIC from `frame`.
    ///
    /// Returns `Ok(false)` without touching anything when there is no
    /// frame. Fails, also without touching anything, if the metadata can
    /// not be turned into a time calibration.
    #[instrument(skip_all)]
    pub fn update_frame_data<F: IntensityFrame + ?Sized>(
        &mut self,
        frame: Option<&F>,
    ) -> Result<bool> {
        let Some(frame) = frame else {
            trace!("No frame data, skipping update");
            return Ok(false);
        };
        let calibration = TimeCalibration::from_metadata(&self.metadata)?;

        if self.metadata.scan_count() == 0 {
            self.max_scan = frame.num_scans();
            if let Some(range) = self.aggregator.range() {
                let clamped = self.clamp_to_max_scan(range);
                self.aggregator.set_range(clamped);
            }
            debug!("Scan count taken from the frame: {}", self.max_scan);
        }

        self.aggregator.aggregate(Some(frame), calibration);
        self.projection
            .rebuild(self.aggregator.series(), calibration.time_factor());
        debug!(
            "Aggregated {} scans over {:?}",
            self.aggregator.series().len(),
            self.aggregator.range()
        );

        self.refresh_plot();
        self.notify(TicChange::FrameUpdated);
        Ok(true)
    }

    fn refresh_plot(&mut self) {
        self.selector.refresh(&self.projection);
        self.target.replace_points(self.selector.active_series());
        self.target.set_x_axis(&self.selector.axis());
        self.target.invalidate();
    }

    fn current_or_full_range(&self) -> ScanRange {
        self.aggregator
            .range()
            .unwrap_or(ScanRange::full(self.scan_limit()))
    }

    fn apply_range(&mut self, range: ScanRange) -> ScanRange {
        if self.aggregator.range() == Some(range) {
            return range;
        }
        self.aggregator.set_range(range);

        // Derived series are stale until the host hands the frame back.
        self.aggregator.invalidate();
        self.projection.clear();
        self.selector.clear();
        self.target.replace_points(&[]);
        self.target.invalidate();

        self.notify(TicChange::RangeChanged(range));
        range
    }

    /// Negative starts are raised to zero.
    pub fn change_start_scan(&mut self, value: i64) -> ScanRange {
        let range = self.current_or_full_range().with_clamped_start(value);
        self.apply_range(range)
    }

    /// Ends past the scan maximum are truncated to it.
    pub fn change_end_scan(&mut self, value: i64) -> ScanRange {
        let range = self
            .current_or_full_range()
            .with_clamped_end(value, self.scan_limit());
        self.apply_range(range)
    }

    pub fn change_max_scan(&mut self, value: usize) -> ScanRange {
        self.max_scan = value;
        self.change_end_scan(i64::try_from(value).unwrap_or(i64::MAX))
    }

    /// Moves both bounds and re-aggregates `frame` in one go.
    pub fn select_range<F: IntensityFrame + ?Sized>(
        &mut self,
        start: i64,
        end: i64,
        frame: Option<&F>,
    ) -> Result<ScanRange> {
        let range = self
            .current_or_full_range()
            .with_clamped_end(end, self.scan_limit())
            .with_clamped_start(start);
        let range = self.apply_range(range);
        self.update_frame_data(frame)?;
        Ok(range)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        let changed = mode != self.selector.mode();
        self.selector.set_mode(mode, &self.projection);
        self.target.replace_points(self.selector.active_series());
        self.target.set_x_axis(&self.selector.axis());
        self.target.invalidate();
        if changed {
            self.notify(TicChange::DisplayModeChanged(mode));
        }
    }

    pub fn set_show_scan_time(&mut self, show: bool) {
        let mode = if show {
            DisplayMode::ArrivalTime
        } else {
            DisplayMode::ScanIndex
        };
        self.set_display_mode(mode);
    }

    pub fn show_scan_time(&self) -> bool {
        self.selector.mode() == DisplayMode::ArrivalTime
    }

    /// Annotates the peaks of the current TIC.
    ///
    /// Detection always runs over every scan of the instrument, the
    /// scans outside of the selected range count as empty.
    #[instrument(skip_all)]
    pub fn find_peaks(&mut self) -> Result<&[AnnotationRecord]> {
        let full_scan_count = self.full_scan_count();
        if full_scan_count == 0 {
            warn!("Scan count unknown until a frame is supplied, no peaks to find");
        }
        let outcome = self
            .annotation_engine
            .find_peaks(self.aggregator.series(), full_scan_count)
            .map(|x| x.len());

        self.target
            .replace_annotations(self.annotation_engine.annotations());
        self.target.invalidate();

        let num_peaks = outcome?;
        info!("Annotated {} peaks", num_peaks);
        self.notify(TicChange::AnnotationsUpdated);
        Ok(self.annotation_engine.annotations())
    }

    /// Summed intensity per scan of the last aggregation.
    pub fn tic_data(&self) -> &AggregatedSeries {
        self.aggregator.series()
    }

    pub fn projection(&self) -> &DualDomainProjection {
        &self.projection
    }

    pub fn active_series(&self) -> &[ProjectedPoint] {
        self.selector.active_series()
    }

    pub fn max_value(&self) -> f64 {
        self.selector.max_value()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.selector.mode()
    }

    pub fn annotations(&self) -> &[AnnotationRecord] {
        self.annotation_engine.annotations()
    }

    pub fn scan_range(&self) -> Option<ScanRange> {
        self.aggregator.range()
    }

    pub fn max_scan(&self) -> usize {
        self.max_scan
    }

    pub fn time_factor(&self) -> f64 {
        self.aggregator.time_factor()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn into_target(self) -> R {
        self.target
    }
}
