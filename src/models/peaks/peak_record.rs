use serde::{Deserialize, Serialize};

/// A detected peak of the TIC, x values are in scan units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakRecord {
    pub center: f64,
    pub intensity: f64,
    pub resolving_power: f64,
    pub fwhm: f64,
    pub left_midpoint: f64,
    pub right_midpoint: f64,
    pub area: f64,
}

impl PeakRecord {
    /// A peak known only by its center, height and resolving power.
    /// The width is back-calculated from `resolving_power = center / fwhm`.
    pub fn new(center: f64, intensity: f64, resolving_power: f64) -> Self {
        let fwhm = if resolving_power > 0.0 {
            center / resolving_power
        } else {
            0.0
        };
        Self {
            center,
            intensity,
            resolving_power,
            fwhm,
            left_midpoint: center - fwhm / 2.0,
            right_midpoint: center + fwhm / 2.0,
            area: 0.0,
        }
    }
}

impl std::fmt::Display for PeakRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Peak Center: {:.2}\nIntensity: {:.2}\nResolving Power: {:.2}\nFWHM: {:.2}\nLeft Midpoint: {:.2}\nRight Midpoint: {:.2}\nArea: {:.2}",
            self.center,
            self.intensity,
            self.resolving_power,
            self.fwhm,
            self.left_midpoint,
            self.right_midpoint,
            self.area,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_record_from_resolving_power() {
        let peak = PeakRecord::new(120.0, 5000.0, 40.0);
        assert!((peak.fwhm - 3.0).abs() < 1e-12);
        assert!((peak.left_midpoint - 118.5).abs() < 1e-12);
        assert!((peak.right_midpoint - 121.5).abs() < 1e-12);
    }

    #[test]
    fn test_peak_record_display() {
        let peak = PeakRecord::new(120.0, 5000.0, 37.42);
        let dump = peak.to_string();
        assert!(dump.contains("Peak Center: 120.00"), "{}", dump);
        assert!(dump.contains("Intensity: 5000.00"), "{}", dump);
        assert!(dump.contains("Resolving Power: 37.42"), "{}", dump);
    }
}
