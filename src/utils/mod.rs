pub mod display;
pub mod smoothing;
