use serde::{Deserialize, Serialize};

use crate::errors::{DataProcessingError, Result};

/// Half open range of mobility scans, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanRange {
    start: usize,
    end: usize,
}

impl ScanRange {
    pub fn try_new(start: usize, end: usize) -> Result<Self> {
        if start > end {
            return Err(DataProcessingError::InvalidScanRange { start, end }.into());
        }
        Ok(Self { start, end })
    }

    /// The whole frame, `0..num_scans`.
    pub fn full(num_scans: usize) -> Self {
        Self {
            start: 0,
            end: num_scans,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, scan_index: usize) -> bool {
        scan_index >= self.start && scan_index < self.end
    }

    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Moves the start, negative values are raised to zero and
    /// the start never moves past the end.
    pub fn with_clamped_start(self, value: i64) -> Self {
        let start = clamp_to_usize(value).min(self.end);
        Self { start, ..self }
    }

    /// Moves the end, values above `max_scan` are truncated to it and
    /// the end never drops below the start.
    pub fn with_clamped_end(self, value: i64, max_scan: usize) -> Self {
        let end = clamp_to_usize(value).min(max_scan);
        if end < self.start {
            return Self {
                start: end,
                end,
            };
        }
        Self { end, ..self }
    }
}

fn clamp_to_usize(value: i64) -> usize {
    if value < 0 {
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

impl From<ScanRange> for std::ops::Range<usize> {
    fn from(value: ScanRange) -> Self {
        value.start..value.end
    }
}
