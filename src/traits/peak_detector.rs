use crate::errors::Result;
use crate::models::peaks::peak_record::PeakRecord;

/// Finds peaks in a dense, gap free `(x, intensity)` series.
///
/// Any algorithm that honors this contract can be plugged into the
/// annotation engine.
pub trait PeakDetector {
    fn find_peaks(&self, series: &[(f64, f64)]) -> Result<Vec<PeakRecord>>;
}

impl<F> PeakDetector for F
where
    F: Fn(&[(f64, f64)]) -> Result<Vec<PeakRecord>>,
{
    fn find_peaks(&self, series: &[(f64, f64)]) -> Result<Vec<PeakRecord>> {
        self(series)
    }
}
