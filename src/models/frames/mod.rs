pub mod dense_frame;
pub mod raw_frames;
pub mod raw_peak;

pub use dense_frame::DenseFrame;
pub use raw_frames::TimsFrameView;
pub use raw_peak::RawPeak;
