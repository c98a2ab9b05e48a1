use crate::models::frames::raw_peak::RawPeak;

/// A two dimensional (scan x time-of-flight bin) block of intensities.
///
/// Implementors only need to be able to walk the non-empty cells of
/// a single scan, so both dense matrices and the scan-offset layout
/// used by timsTOF frames fit behind it.
pub trait IntensityFrame {
    fn num_scans(&self) -> usize;
    fn num_bins(&self) -> usize;

    /// Calls `fun` once for every cell of `scan_index`.
    /// Scans outside of the frame yield nothing.
    fn for_each_peak_in_scan(&self, scan_index: usize, fun: &mut dyn FnMut(RawPeak));

    fn scan_total(&self, scan_index: usize) -> f64 {
        let mut total = 0.0;
        self.for_each_peak_in_scan(scan_index, &mut |peak| total += peak.intensity);
        total
    }
}
