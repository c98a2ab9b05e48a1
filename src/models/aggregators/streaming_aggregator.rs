// Weighted running mean, used to get intensity weighted
// centroids of peaks without keeping the points around.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamingAggregatorError {
    NotEnoughData,
}

type Result<T> = std::result::Result<T, StreamingAggregatorError>;

/// Ref impl in javascript ...
/// https://nestedsoftware.com/2018/03/27/calculating-standard-deviation-on-streaming-data-253l.23919.html
/// https://nestedsoftware.com/2019/09/26/incremental-average-and-standard-deviation-with-sliding-window-470k.176143.html
///
/// Weights are intensities, so they are floats and zero weights are
/// simply skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStatsCalculator {
    weight: f64,
    mean_n: f64,
}

impl RunningStatsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new value to the running stats calculator.
    pub fn add(&mut self, value: f64, weight: f64) {
        if weight <= 0.0 || !weight.is_finite() {
            return;
        }
        let new_weight = self.weight + weight;
        let delta = value - self.mean_n;
        self.mean_n += delta * (weight / new_weight);
        self.weight = new_weight;
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn mean(&self) -> Result<f64> {
        if self.weight == 0.0 {
            return Err(StreamingAggregatorError::NotEnoughData);
        }
        Ok(self.mean_n)
    }
}
