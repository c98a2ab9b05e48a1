pub mod annotation;
pub mod apex_detector;
pub mod peak_record;

pub use annotation::{AnnotationFailurePolicy, AnnotationRecord, PeakAnnotationEngine};
pub use apex_detector::{ApexPeakDetector, PeakDetectionSettings};
pub use peak_record::PeakRecord;
