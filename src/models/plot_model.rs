use serde::{Deserialize, Serialize};

use super::display_mode::AxisMetadata;
use super::peaks::AnnotationRecord;
use super::projection::ProjectedPoint;
use crate::traits::render_target::RenderTarget;

/// In memory render target, holds what would be on screen.
///
/// `invalidations` counts the redraw requests, handy for hosts that
/// poll instead of listening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotModel {
    pub points: Vec<ProjectedPoint>,
    pub x_axis: AxisMetadata,
    pub annotations: Vec<AnnotationRecord>,
    pub invalidations: u64,
}

impl PlotModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for PlotModel {
    fn replace_points(&mut self, points: &[ProjectedPoint]) {
        self.points.clear();
        self.points.extend_from_slice(points);
    }

    fn set_x_axis(&mut self, axis: &AxisMetadata) {
        self.x_axis = axis.clone();
    }

    fn replace_annotations(&mut self, annotations: &[AnnotationRecord]) {
        self.annotations = annotations.to_vec();
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}
