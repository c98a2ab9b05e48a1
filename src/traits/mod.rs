pub mod aggregator;
pub mod instrument;
pub mod intensity_frame;
pub mod peak_detector;
pub mod render_target;
