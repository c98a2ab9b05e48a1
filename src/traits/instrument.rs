/// Read-only view of the acquisition parameters the TIC needs.
///
/// Queried once per frame update.
pub trait InstrumentMetadata {
    /// Width of a single time-of-flight bin, in tenths of nanoseconds.
    fn tenths_of_nanoseconds_per_bin(&self) -> f64;

    /// Number of mobility scans in a full frame.
    fn scan_count(&self) -> usize;
}

impl<T: InstrumentMetadata + ?Sized> InstrumentMetadata for &T {
    fn tenths_of_nanoseconds_per_bin(&self) -> f64 {
        (**self).tenths_of_nanoseconds_per_bin()
    }

    fn scan_count(&self) -> usize {
        (**self).scan_count()
    }
}
