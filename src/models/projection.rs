use serde::{Deserialize, Serialize};

use super::aggregators::AggregatedSeries;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for ProjectedPoint {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

/// The TIC seen in both display domains: raw scan numbers and
/// arrival times. Both are rebuilt from scratch on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DualDomainProjection {
    time_series: Vec<ProjectedPoint>,
    index_series: Vec<ProjectedPoint>,
}

impl DualDomainProjection {
    pub fn from_series(series: &AggregatedSeries, time_factor: f64) -> Self {
        let mut out = Self::default();
        out.rebuild(series, time_factor);
        out
    }

    pub fn rebuild(&mut self, series: &AggregatedSeries, time_factor: f64) {
        self.time_series.clear();
        self.index_series.clear();
        self.time_series.reserve(series.len());
        self.index_series.reserve(series.len());

        for (scan_index, intensity) in series.iter() {
            let scan = scan_index as f64;
            self.time_series
                .push(ProjectedPoint::new(scan * time_factor, intensity));
            self.index_series.push(ProjectedPoint::new(scan, intensity));
        }
    }

    pub fn clear(&mut self) {
        self.time_series.clear();
        self.index_series.clear();
    }

    pub fn time_series(&self) -> &[ProjectedPoint] {
        &self.time_series
    }

    pub fn index_series(&self) -> &[ProjectedPoint] {
        &self.index_series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_of_scenario() {
        let series: AggregatedSeries = vec![(0, 3.0), (1, 7.0), (2, 11.0)].into_iter().collect();
        let proj = DualDomainProjection::from_series(&series, 0.001);

        assert_eq!(
            proj.index_series(),
            &[
                ProjectedPoint::new(0.0, 3.0),
                ProjectedPoint::new(1.0, 7.0),
                ProjectedPoint::new(2.0, 11.0),
            ]
        );

        let expect_time = [(0.0, 3.0), (0.001, 7.0), (0.002, 11.0)];
        assert_eq!(proj.time_series().len(), expect_time.len());
        for (got, expect) in proj.time_series().iter().zip(expect_time.iter()) {
            assert!((got.x - expect.0).abs() < 1e-12, "{:?} vs {:?}", got, expect);
            assert_eq!(got.y, expect.1);
        }
    }

    #[test]
    fn test_projection_rebuild_replaces_points() {
        let series: AggregatedSeries = vec![(5, 1.0), (6, 2.0)].into_iter().collect();
        let mut proj = DualDomainProjection::from_series(&series, 0.5);
        let series: AggregatedSeries = vec![(1, 9.0)].into_iter().collect();
        proj.rebuild(&series, 0.5);
        assert_eq!(proj.index_series(), &[ProjectedPoint::new(1.0, 9.0)]);
        assert_eq!(proj.time_series(), &[ProjectedPoint::new(0.5, 9.0)]);
    }

    #[test]
    fn test_projection_keeps_relative_order() {
        let series: AggregatedSeries = vec![(9, 1.0), (3, 2.0), (6, 3.0)].into_iter().collect();
        let proj = DualDomainProjection::from_series(&series, 2.0);
        let index_x: Vec<f64> = proj.index_series().iter().map(|p| p.x).collect();
        let time_x: Vec<f64> = proj.time_series().iter().map(|p| p.x).collect();
        assert_eq!(index_x, vec![3.0, 6.0, 9.0]);
        assert_eq!(time_x, vec![6.0, 12.0, 18.0]);
    }
}
