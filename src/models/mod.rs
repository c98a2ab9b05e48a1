pub mod aggregators;
pub mod display_mode;
pub mod frames;
pub mod instrument;
pub mod peaks;
pub mod plot_model;
pub mod projection;
pub mod scan_range;
pub mod settings;
pub mod tic_view;
