/// A single cell of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPeak {
    pub scan_index: usize,
    pub tof_index: u32,
    pub intensity: f64,
}
