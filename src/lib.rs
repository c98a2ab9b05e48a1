// Re-export main structures
pub use crate::models::aggregators::{AggregatedSeries, ScanAggregator};
pub use crate::models::display_mode::{AxisMetadata, DisplayMode, DisplayModeSelector};
pub use crate::models::frames::{DenseFrame, RawPeak, TimsFrameView};
pub use crate::models::instrument::{FrameParameters, TimeCalibration};
pub use crate::models::peaks::{
    AnnotationFailurePolicy, AnnotationRecord, ApexPeakDetector, PeakAnnotationEngine,
    PeakDetectionSettings, PeakRecord,
};
pub use crate::models::plot_model::PlotModel;
pub use crate::models::projection::{DualDomainProjection, ProjectedPoint};
pub use crate::models::scan_range::ScanRange;
pub use crate::models::settings::TicSettings;
pub use crate::models::tic_view::{TicChange, TicViewModel};

// Re-export traits
pub use crate::traits::aggregator::Aggregator;
pub use crate::traits::instrument::InstrumentMetadata;
pub use crate::traits::intensity_frame::IntensityFrame;
pub use crate::traits::peak_detector::PeakDetector;
pub use crate::traits::render_target::RenderTarget;

pub use crate::errors::{Result, TimsticError};

// Declare modules
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;
