use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Point};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u32);

impl SeriesId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "series#{}", self.0)
    }
}

/// Vertical padding applied when a series' values are all equal.
const FLAT_VALUE_HALF_SPAN: f64 = 0.5;

/// One logical series: ordered points plus its value-axis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    id: SeriesId,
    label: String,
    points: Vec<Point>,
    value_domain: Option<(f64, f64)>,
}

impl Series {
    #[must_use]
    pub fn new(id: SeriesId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            points: Vec::new(),
            value_domain: None,
        }
    }

    /// Pins the value axis instead of deriving it from data.
    pub fn with_value_domain(mut self, min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "value domain must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidRange { start: min, end: max });
        }
        self.value_domain = Some((min, max));
        Ok(self)
    }

    #[must_use]
    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.set_points(points);
        self
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        self.value_domain
    }

    /// Replaces the points, dropping non-finite samples and sorting by time.
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = canonicalize_points(points);
    }

    /// Min/max of the series values, or `None` without data.
    #[must_use]
    pub fn calculate_domain_from_data(&self) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|point| point.value);
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });
        if min == max {
            return Some((min - FLAT_VALUE_HALF_SPAN, max + FLAT_VALUE_HALF_SPAN));
        }
        Some((min, max))
    }

    /// Base (un-rescaled) value scale of this series over a pixel range.
    pub fn scale(&self, range: (f64, f64)) -> ChartResult<LinearScale> {
        let domain = self
            .value_domain
            .filter(|(min, max)| min < max)
            .or_else(|| self.calculate_domain_from_data())
            .ok_or_else(|| {
                ChartError::InvalidData(format!("{} has no value domain", self.id))
            })?;
        LinearScale::new(domain, range)
    }
}

fn canonicalize_points(points: Vec<Point>) -> Vec<Point> {
    let mut points: Vec<Point> = points.into_iter().filter(|p| p.is_finite()).collect();
    points.sort_by_key(|point| OrderedFloat(point.timestamp));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_sorted_and_filtered() {
        let series = Series::new(SeriesId::new(1), "temp").with_points(vec![
            Point::new(3.0, 1.0),
            Point::new(f64::NAN, 2.0),
            Point::new(1.0, 5.0),
        ]);
        let times: Vec<f64> = series.points().iter().map(|p| p.timestamp).collect();
        assert_eq!(times, vec![1.0, 3.0]);
    }

    #[test]
    fn flat_data_gets_padded_domain() {
        let series = Series::new(SeriesId::new(1), "flat")
            .with_points(vec![Point::new(0.0, 4.0), Point::new(1.0, 4.0)]);
        assert_eq!(series.calculate_domain_from_data(), Some((3.5, 4.5)));
    }

    #[test]
    fn pinned_domain_overrides_data() {
        let series = Series::new(SeriesId::new(1), "pinned")
            .with_points(vec![Point::new(0.0, 4.0), Point::new(1.0, 8.0)])
            .with_value_domain(0.0, 100.0)
            .expect("domain");
        let scale = series.scale((300.0, 0.0)).expect("scale");
        assert_eq!(scale.domain(), (0.0, 100.0));
    }

    #[test]
    fn empty_series_has_no_scale() {
        let series = Series::new(SeriesId::new(2), "empty");
        assert!(series.calculate_domain_from_data().is_none());
        assert!(series.scale((100.0, 0.0)).is_err());
    }
}
