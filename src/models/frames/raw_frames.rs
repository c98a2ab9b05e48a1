use timsrust::Frame;

use super::raw_peak::RawPeak;
use crate::traits::intensity_frame::IntensityFrame;

/// Borrowed view over a timsTOF frame.
///
/// The frame stores peaks scan by scan, `scan_offsets[i]..scan_offsets[i + 1]`
/// being the slice of `tof_indices`/`intensities` that belongs to scan `i`.
#[derive(Debug, Clone, Copy)]
pub struct TimsFrameView<'a> {
    frame: &'a Frame,
    num_bins: usize,
}

impl<'a> TimsFrameView<'a> {
    pub fn new(frame: &'a Frame) -> Self {
        let num_bins = frame
            .tof_indices
            .iter()
            .max()
            .map(|x| *x as usize + 1)
            .unwrap_or(0);
        Self { frame, num_bins }
    }

    pub fn frame(&self) -> &'a Frame {
        self.frame
    }
}

impl<'a> From<&'a Frame> for TimsFrameView<'a> {
    fn from(frame: &'a Frame) -> Self {
        Self::new(frame)
    }
}

impl IntensityFrame for TimsFrameView<'_> {
    fn num_scans(&self) -> usize {
        self.frame.scan_offsets.len().saturating_sub(1)
    }

    fn num_bins(&self) -> usize {
        self.num_bins
    }

    fn for_each_peak_in_scan(&self, scan_index: usize, fun: &mut dyn FnMut(RawPeak)) {
        if scan_index >= self.num_scans() {
            return;
        }
        let scan_is = self.frame.scan_offsets[scan_index];
        let scan_ie = self.frame.scan_offsets[scan_index + 1];

        for peak_index in scan_is..scan_ie {
            fun(RawPeak {
                scan_index,
                tof_index: self.frame.tof_indices[peak_index],
                intensity: self.frame.intensities[peak_index] as f64,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use timsrust::{AcquisitionType, MSLevel, QuadrupoleSettings};

    fn sample_frame() -> Frame {
        Frame {
            tof_indices: vec![1, 2, 3, 4, 1, 2],
            scan_offsets: vec![0, 2, 4, 4, 6],
            intensities: vec![10, 20, 30, 40, 50, 60],
            index: 0,
            rt: 0.0,
            acquisition_type: AcquisitionType::DIAPASEF,
            ms_level: MSLevel::MS1,
            quadrupole_settings: Arc::new(QuadrupoleSettings::default()),
            intensity_correction_factor: 1.0,
            window_group: 0,
        }
    }

    #[test]
    fn test_tims_frame_view_dimensions() {
        let frame = sample_frame();
        let view = TimsFrameView::new(&frame);
        assert_eq!(view.num_scans(), 4);
        assert_eq!(view.num_bins(), 5);
    }

    #[test]
    fn test_tims_frame_view_scan_totals() {
        let frame = sample_frame();
        let view = TimsFrameView::from(&frame);
        assert_eq!(view.scan_total(0), 30.0);
        assert_eq!(view.scan_total(1), 70.0);
        // Empty scan in the middle
        assert_eq!(view.scan_total(2), 0.0);
        assert_eq!(view.scan_total(3), 110.0);
        assert_eq!(view.scan_total(4), 0.0);

        let mut tofs = Vec::new();
        view.for_each_peak_in_scan(1, &mut |p| tofs.push((p.scan_index, p.tof_index)));
        assert_eq!(tofs, vec![(1, 3), (1, 4)]);
    }
}
