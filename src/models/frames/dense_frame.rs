use serde::{Deserialize, Serialize};

use super::raw_peak::RawPeak;
use crate::errors::{Result, UnsupportedDataError};
use crate::traits::intensity_frame::IntensityFrame;

/// A fully materialized frame, stored row major (one row per scan).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DenseFrameRepr", into = "DenseFrameRepr")]
pub struct DenseFrame {
    scans: usize,
    bins: usize,
    data: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct DenseFrameRepr {
    scans: usize,
    bins: usize,
    data: Vec<f64>,
}

impl TryFrom<DenseFrameRepr> for DenseFrame {
    type Error = String;

    fn try_from(value: DenseFrameRepr) -> std::result::Result<Self, Self::Error> {
        DenseFrame::new(value.scans, value.bins, value.data).map_err(|e| e.to_string())
    }
}

impl From<DenseFrame> for DenseFrameRepr {
    fn from(value: DenseFrame) -> Self {
        DenseFrameRepr {
            scans: value.scans,
            bins: value.bins,
            data: value.data,
        }
    }
}

impl DenseFrame {
    pub fn new(scans: usize, bins: usize, data: Vec<f64>) -> Result<Self> {
        if scans.checked_mul(bins) != Some(data.len()) {
            return Err(UnsupportedDataError::MalformedFrame {
                scans,
                bins,
                values: data.len(),
            }
            .into());
        }
        Ok(Self { scans, bins, data })
    }

    /// Builds a frame from one vector per scan.
    /// All rows need to have the same number of bins.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let bins = rows.first().map(|x| x.len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * bins);
        for row in rows.iter() {
            if row.len() != bins {
                return Err(UnsupportedDataError::MalformedFrame {
                    scans: rows.len(),
                    bins,
                    values: data.len() + row.len(),
                }
                .into());
            }
            data.extend_from_slice(row);
        }
        Self::new(rows.len(), bins, data)
    }

    pub fn zeros(scans: usize, bins: usize) -> Self {
        Self {
            scans,
            bins,
            data: vec![0.0; scans * bins],
        }
    }

    pub fn row(&self, scan_index: usize) -> Option<&[f64]> {
        if scan_index >= self.scans {
            return None;
        }
        let start = scan_index * self.bins;
        Some(&self.data[start..start + self.bins])
    }

    pub fn row_mut(&mut self, scan_index: usize) -> Option<&mut [f64]> {
        if scan_index >= self.scans {
            return None;
        }
        let start = scan_index * self.bins;
        Some(&mut self.data[start..start + self.bins])
    }

    pub fn get(&self, scan_index: usize, bin_index: usize) -> Option<f64> {
        if bin_index >= self.bins {
            return None;
        }
        self.row(scan_index).map(|row| row[bin_index])
    }
}

impl IntensityFrame for DenseFrame {
    fn num_scans(&self) -> usize {
        self.scans
    }

    fn num_bins(&self) -> usize {
        self.bins
    }

    fn for_each_peak_in_scan(&self, scan_index: usize, fun: &mut dyn FnMut(RawPeak)) {
        let Some(row) = self.row(scan_index) else {
            return;
        };
        for (tof_index, intensity) in row.iter().enumerate() {
            fun(RawPeak {
                scan_index,
                tof_index: tof_index as u32,
                intensity: *intensity,
            });
        }
    }

    fn scan_total(&self, scan_index: usize) -> f64 {
        self.row(scan_index).map(|row| row.iter().sum()).unwrap_or(0.0)
    }
}
