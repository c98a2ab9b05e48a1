use serde::{Deserialize, Serialize};
use tracing::trace;

use super::peak_record::PeakRecord;
use crate::errors::{PeakDetectionError, Result};
use crate::models::aggregators::RunningStatsCalculator;
use crate::traits::peak_detector::PeakDetector;
use crate::utils::smoothing::SmoothingMethod;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakDetectionSettings {
    pub smoothing: SmoothingMethod,
    /// Apexes below this fraction of the highest point are ignored.
    pub min_relative_intensity: f64,
}

impl Default for PeakDetectionSettings {
    fn default() -> Self {
        Self {
            smoothing: SmoothingMethod::default(),
            min_relative_intensity: 0.05,
        }
    }
}

/// Local maxima peak picker with half height width estimation.
///
/// Apexes are located on the smoothed trace, widths are measured at
/// half of the smoothed apex height and interpolated between samples.
#[derive(Debug, Clone, Default)]
pub struct ApexPeakDetector {
    settings: PeakDetectionSettings,
}

impl ApexPeakDetector {
    pub fn new(settings: PeakDetectionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PeakDetectionSettings {
        &self.settings
    }
}

impl PeakDetector for ApexPeakDetector {
    fn find_peaks(&self, series: &[(f64, f64)]) -> Result<Vec<PeakRecord>> {
        validate_series(series)?;
        if series.len() < 3 {
            return Ok(Vec::new());
        }

        let (xs, ys): (Vec<f64>, Vec<f64>) = series.iter().copied().unzip();
        let smoothed = self.settings.smoothing.apply(&ys);

        let max_intensity = ys.iter().copied().fold(0.0, f64::max);
        if max_intensity <= 0.0 {
            return Ok(Vec::new());
        }
        let threshold = max_intensity * self.settings.min_relative_intensity;

        let peaks: Vec<PeakRecord> = find_apexes(&smoothed)
            .into_iter()
            .filter(|&apex| ys[apex] > 0.0 && ys[apex] >= threshold)
            .filter_map(|apex| describe_peak(&xs, &ys, &smoothed, apex))
            .collect();
        trace!("Peaks: {:?}", peaks);
        Ok(peaks)
    }
}

fn validate_series(series: &[(f64, f64)]) -> Result<()> {
    for (position, (x, y)) in series.iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(PeakDetectionError::NonFiniteIntensity { position }.into());
        }
    }
    if let Some(position) = series.windows(2).position(|w| w[1].0 <= w[0].0) {
        return Err(PeakDetectionError::UnsortedSeries {
            position: position + 1,
        }
        .into());
    }
    Ok(())
}

/// Interior local maxima. For flat tops the first sample is reported,
/// plateaus that never come down again, or that climb further, are not peaks.
fn find_apexes(ys: &[f64]) -> Vec<usize> {
    let mut out = Vec::new();
    for i in 1..ys.len().saturating_sub(1) {
        if ys[i] <= ys[i - 1] || ys[i] < ys[i + 1] {
            continue;
        }
        let mut k = i + 1;
        while k < ys.len() && ys[k] == ys[i] {
            k += 1;
        }
        if k < ys.len() && ys[k] < ys[i] {
            out.push(i);
        }
    }
    out
}

/// Walks away from the apex while the trace keeps going down and stays
/// above `half`. Returns the last index above half height and the
/// interpolated x of the crossing.
fn half_height_edge(xs: &[f64], ys: &[f64], apex: usize, half: f64, step_left: bool) -> (usize, f64) {
    let next = |k: usize| -> Option<usize> {
        if step_left {
            k.checked_sub(1)
        } else if k + 1 < ys.len() {
            Some(k + 1)
        } else {
            None
        }
    };

    let mut k = apex;
    while let Some(n) = next(k) {
        if ys[n] > ys[k] {
            // Valley before reaching half height
            return (k, xs[k]);
        }
        if ys[n] < half {
            let frac = (ys[k] - half) / (ys[k] - ys[n]);
            return (k, xs[k] + frac * (xs[n] - xs[k]));
        }
        k = n;
    }
    (k, xs[k])
}

fn describe_peak(xs: &[f64], ys: &[f64], smoothed: &[f64], apex: usize) -> Option<PeakRecord> {
    let half = smoothed[apex] / 2.0;
    let (left_idx, left_midpoint) = half_height_edge(xs, smoothed, apex, half, true);
    let (right_idx, right_midpoint) = half_height_edge(xs, smoothed, apex, half, false);

    let fwhm = right_midpoint - left_midpoint;
    if fwhm <= 0.0 {
        return None;
    }

    let mut stats = RunningStatsCalculator::new();
    for i in left_idx..=right_idx {
        stats.add(xs[i], ys[i]);
    }
    let center = stats.mean().unwrap_or(xs[apex]);

    let area = (left_idx..right_idx)
        .map(|i| 0.5 * (ys[i] + ys[i + 1]) * (xs[i + 1] - xs[i]))
        .sum();

    Some(PeakRecord {
        center,
        intensity: ys[apex],
        resolving_power: center / fwhm,
        fwhm,
        left_midpoint,
        right_midpoint,
        area,
    })
}
