use crate::models::display_mode::AxisMetadata;
use crate::models::peaks::annotation::AnnotationRecord;
use crate::models::projection::ProjectedPoint;

/// Whatever ends up drawing the chromatogram.
///
/// Every setter replaces the previous content wholesale,
/// `invalidate` asks for a redraw.
pub trait RenderTarget {
    fn replace_points(&mut self, points: &[ProjectedPoint]);
    fn set_x_axis(&mut self, axis: &AxisMetadata);
    fn replace_annotations(&mut self, annotations: &[AnnotationRecord]);
    fn invalidate(&mut self);
}
