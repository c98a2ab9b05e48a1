use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{DataProcessingError, Result};
use crate::traits::instrument::InstrumentMetadata;

/// Acquisition parameters supplied alongside the frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameParameters {
    pub tenths_of_nanoseconds_per_bin: f64,
    /// Number of scans in a full frame, `None` means
    /// "use whatever the frame has".
    pub scans: Option<usize>,
}

impl Default for FrameParameters {
    fn default() -> Self {
        Self {
            tenths_of_nanoseconds_per_bin: 10.0,
            scans: None,
        }
    }
}

impl FrameParameters {
    /// Fills in the scan count if it was left unset.
    pub fn resolve_scans(self, frame_scans: usize) -> Self {
        Self {
            scans: Some(self.scans.unwrap_or(frame_scans)),
            ..self
        }
    }
}

impl InstrumentMetadata for FrameParameters {
    fn tenths_of_nanoseconds_per_bin(&self) -> f64 {
        self.tenths_of_nanoseconds_per_bin
    }

    fn scan_count(&self) -> usize {
        self.scans.unwrap_or(0)
    }
}

/// Scale between scan numbers and arrival times (ms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeCalibration {
    time_factor: f64,
}

impl TimeCalibration {
    pub fn from_metadata<M: InstrumentMetadata + ?Sized>(metadata: &M) -> Result<Self> {
        let bin_width = metadata.tenths_of_nanoseconds_per_bin();
        if !bin_width.is_finite() || bin_width <= 0.0 {
            warn!("Refusing to calibrate with a bin width of {}", bin_width);
            return Err(DataProcessingError::InvalidCalibration {
                tenths_of_nanoseconds_per_bin: bin_width,
            }
            .into());
        }
        Ok(Self {
            time_factor: bin_width / 1_000_000.0,
        })
    }

    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }

    pub fn scan_to_time(&self, scan_index: usize) -> f64 {
        scan_index as f64 * self.time_factor
    }
}
