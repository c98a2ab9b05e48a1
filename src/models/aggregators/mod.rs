pub mod streaming_aggregator;
pub mod tic_agg;

pub use streaming_aggregator::RunningStatsCalculator;
pub use tic_agg::{AggregatedSeries, ScanAggregator, TicAggregator};
