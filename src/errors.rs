use std::fmt::Display;
use timsrust::readers::FrameReaderError;

#[derive(Debug)]
pub enum TimsticError {
    DataReadingError(DataReadingError),
    DataProcessingError(DataProcessingError),
    Other(String),
}

pub type Result<T> = std::result::Result<T, TimsticError>;

impl Display for TimsticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for TimsticError {}

impl TimsticError {
    pub fn custom(msg: impl Display) -> Self {
        Self::Other(msg.to_string())
    }
}

#[derive(Debug)]
pub enum DataReadingError {
    UnsupportedDataError(UnsupportedDataError),
    FrameReaderError(FrameReaderError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

#[derive(Debug)]
pub enum UnsupportedDataError {
    FrameIndexOutOfBounds { index: usize, num_frames: usize },
    MalformedFrame { scans: usize, bins: usize, values: usize },
}

#[derive(Debug)]
pub enum DataProcessingError {
    InvalidCalibration { tenths_of_nanoseconds_per_bin: f64 },
    InvalidScanRange { start: usize, end: usize },
    PeakDetectionError(PeakDetectionError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakDetectionError {
    NonFiniteIntensity { position: usize },
    UnsortedSeries { position: usize },
}

impl From<UnsupportedDataError> for DataReadingError {
    fn from(e: UnsupportedDataError) -> Self {
        DataReadingError::UnsupportedDataError(e)
    }
}

impl From<DataReadingError> for TimsticError {
    fn from(e: DataReadingError) -> Self {
        TimsticError::DataReadingError(e)
    }
}

impl From<UnsupportedDataError> for TimsticError {
    fn from(e: UnsupportedDataError) -> Self {
        TimsticError::DataReadingError(e.into())
    }
}

impl From<FrameReaderError> for TimsticError {
    fn from(e: FrameReaderError) -> Self {
        TimsticError::DataReadingError(DataReadingError::FrameReaderError(e))
    }
}

impl From<std::io::Error> for TimsticError {
    fn from(e: std::io::Error) -> Self {
        TimsticError::DataReadingError(DataReadingError::Io(e))
    }
}

impl From<serde_json::Error> for TimsticError {
    fn from(e: serde_json::Error) -> Self {
        TimsticError::DataReadingError(DataReadingError::Json(e))
    }
}

impl From<DataProcessingError> for TimsticError {
    fn from(e: DataProcessingError) -> Self {
        TimsticError::DataProcessingError(e)
    }
}

impl From<PeakDetectionError> for DataProcessingError {
    fn from(e: PeakDetectionError) -> Self {
        DataProcessingError::PeakDetectionError(e)
    }
}

impl From<PeakDetectionError> for TimsticError {
    fn from(e: PeakDetectionError) -> Self {
        TimsticError::DataProcessingError(e.into())
    }
}
