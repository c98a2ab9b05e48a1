use serde::{Deserialize, Serialize};

use super::projection::{DualDomainProjection, ProjectedPoint};

/// Which domain the x axis of the TIC is drawn in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    ScanIndex,
    ArrivalTime,
}

impl DisplayMode {
    pub fn axis(&self) -> AxisMetadata {
        match self {
            DisplayMode::ScanIndex => AxisMetadata {
                title: "Mobility Scan".into(),
                unit: "Scan Number".into(),
            },
            DisplayMode::ArrivalTime => AxisMetadata {
                title: "Arrival Time".into(),
                unit: "ms".into(),
            },
        }
    }

    pub fn select<'a>(&self, projection: &'a DualDomainProjection) -> &'a [ProjectedPoint] {
        match self {
            DisplayMode::ScanIndex => projection.index_series(),
            DisplayMode::ArrivalTime => projection.time_series(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMetadata {
    pub title: String,
    pub unit: String,
}

impl Default for AxisMetadata {
    fn default() -> Self {
        DisplayMode::default().axis()
    }
}

/// Keeps the live (displayed) copy of one of the two projections and
/// the maximum intensity of exactly that copy.
#[derive(Debug, Clone, Default)]
pub struct DisplayModeSelector {
    mode: DisplayMode,
    live_points: Vec<ProjectedPoint>,
    max_value: f64,
}

impl DisplayModeSelector {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn axis(&self) -> AxisMetadata {
        self.mode.axis()
    }

    pub fn set_mode(&mut self, mode: DisplayMode, projection: &DualDomainProjection) {
        self.mode = mode;
        self.refresh(projection);
    }

    /// Re-copies the projection that matches the current mode.
    pub fn refresh(&mut self, projection: &DualDomainProjection) {
        self.live_points.clear();
        self.max_value = 0.0;
        for point in self.mode.select(projection) {
            self.live_points.push(*point);
            if self.max_value < point.y {
                self.max_value = point.y;
            }
        }
    }

    pub fn clear(&mut self) {
        self.live_points.clear();
        self.max_value = 0.0;
    }

    pub fn active_series(&self) -> &[ProjectedPoint] {
        &self.live_points
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}
