use serde::{Deserialize, Serialize};

use super::display_mode::DisplayMode;
use super::instrument::FrameParameters;
use super::peaks::{AnnotationFailurePolicy, PeakDetectionSettings};

/// Everything the TIC view can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicSettings {
    pub instrument: FrameParameters,
    /// `(start, end)` scans, unset means the whole frame.
    pub scan_range: Option<(i64, i64)>,
    pub display_mode: DisplayMode,
    pub peak_detection: PeakDetectionSettings,
    pub annotation_failure_policy: AnnotationFailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::smoothing::SmoothingMethod;

    #[test]
    fn test_settings_json() {
        let settings = TicSettings {
            scan_range: Some((10, 200)),
            display_mode: DisplayMode::ArrivalTime,
            ..TicSettings::default()
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: TicSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let json = r#"{
            "instrument": {"tenths_of_nanoseconds_per_bin": 2.5, "scans": 360},
            "peak_detection": {"smoothing": "None", "min_relative_intensity": 0.1}
        }"#;
        let settings: TicSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.instrument.scans, Some(360));
        assert_eq!(settings.display_mode, DisplayMode::ScanIndex);
        assert_eq!(settings.peak_detection.smoothing, SmoothingMethod::None);
        assert_eq!(
            settings.annotation_failure_policy,
            AnnotationFailurePolicy::PreserveOnFailure
        );
        assert!(settings.scan_range.is_none());
    }
}
