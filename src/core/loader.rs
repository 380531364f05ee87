//! Pull-based windowed loading contract between the engine and data sources.
//!
//! The engine hands every loader the full domain, the visible window, a point
//! budget and the data it returned last time. Loaders decide whether to reuse
//! that data; the engine never forces a refetch and keeps no side cache.

use std::f64::consts::TAU;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Point, SeriesId};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_POINT_BUDGET: usize = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderRequest {
    pub series_id: SeriesId,
    pub full_domain: (f64, f64),
    pub visible_window: (f64, f64),
    pub point_budget: usize,
    pub previous_series_data: Vec<Point>,
}

impl LoaderRequest {
    /// A hydrated series already holds data the loader may reuse verbatim.
    #[must_use]
    pub fn has_previous_data(&self) -> bool {
        !self.previous_series_data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderResponse {
    pub data: Vec<Point>,
    pub should_draw_point_markers: bool,
}

impl LoaderResponse {
    /// Builds a response whose marker hint follows [`should_draw_point_markers`].
    #[must_use]
    pub fn from_request(request: &LoaderRequest, data: Vec<Point>) -> Self {
        let should_draw_point_markers = should_draw_point_markers(
            request.full_domain,
            request.visible_window,
            data.len(),
            request.point_budget,
        );
        Self {
            data,
            should_draw_point_markers,
        }
    }
}

/// External data source for one series.
pub trait SeriesLoader {
    fn load(&mut self, request: &LoaderRequest) -> ChartResult<LoaderResponse>;
}

/// Number of samples of a uniformly spaced series that fall inside `visible`.
///
/// The window is mapped onto fractional indexes by timestamp position; the
/// lower bound rounds up and the upper bound rounds down.
#[must_use]
pub fn visible_point_count(full: (f64, f64), visible: (f64, f64), total_points: usize) -> usize {
    if total_points == 0 {
        return 0;
    }

    let full_width = full.1 - full.0;
    if full_width <= 0.0 {
        return total_points;
    }

    let last_index = (total_points - 1) as f64;
    let to_index = |time: f64| (time - full.0) / full_width * last_index;
    let lower = to_index(visible.0).ceil().max(0.0);
    let upper = to_index(visible.1).floor().min(last_index);
    if upper < lower {
        return 0;
    }

    (upper - lower) as usize + 1
}

/// Markers are drawn only while fewer than half the budget is visible.
#[must_use]
pub fn should_draw_point_markers(
    full: (f64, f64),
    visible: (f64, f64),
    total_points: usize,
    point_budget: usize,
) -> bool {
    (visible_point_count(full, visible, total_points) as f64) < point_budget as f64 / 2.0
}

/// Ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub series_id: SeriesId,
    pub sequence: u64,
}

/// Orders asynchronous loads per series.
///
/// Each issued ticket supersedes earlier ones for the same series; a response
/// is applied only when its ticket is the latest one issued. Sequence numbers
/// come from one counter shared by all series, so they never repeat, even
/// after a series is forgotten and registered again under the same id.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    next_sequence: u64,
    latest: IndexMap<SeriesId, u64>,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, series_id: SeriesId) -> RequestTicket {
        self.next_sequence = self.next_sequence.saturating_add(1);
        let sequence = self.next_sequence;
        self.latest.insert(series_id, sequence);
        trace!(series = %series_id, seq = sequence, "issue load request");
        RequestTicket {
            series_id,
            sequence,
        }
    }

    #[must_use]
    pub fn latest(&self, series_id: SeriesId) -> Option<u64> {
        self.latest.get(&series_id).copied()
    }

    #[must_use]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest(ticket.series_id) == Some(ticket.sequence)
    }

    /// Returns `false` for superseded tickets; their responses must be dropped.
    pub fn accept(&self, ticket: RequestTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!(
                series = %ticket.series_id,
                seq = ticket.sequence,
                latest = ?self.latest(ticket.series_id),
                "discarding stale loader response"
            );
        }
        current
    }

    /// Drops the live ticket of `series_id`; its outstanding responses become stale.
    pub fn forget(&mut self, series_id: SeriesId) {
        self.latest.shift_remove(&series_id);
    }
}

/// Deterministic wave used for default data and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticWave {
    pub oscillations: f64,
    pub phase: f64,
    pub offset: f64,
    pub amplitude: f64,
    pub point_count: usize,
}

impl Default for SyntheticWave {
    fn default() -> Self {
        Self {
            oscillations: 1.0,
            phase: 0.0,
            offset: 0.0,
            amplitude: 1.0,
            point_count: DEFAULT_POINT_BUDGET,
        }
    }
}

impl SyntheticWave {
    #[must_use]
    pub fn with_oscillations(mut self, oscillations: f64) -> Self {
        self.oscillations = oscillations;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    /// Pure function of `(index, total_count)`.
    #[must_use]
    pub fn value_at(self, index: usize, total_count: usize) -> f64 {
        let position = if total_count > 1 {
            index as f64 / (total_count - 1) as f64
        } else {
            0.0
        };
        self.amplitude * (position * self.oscillations * TAU + self.phase).sin() + self.offset
    }

    /// Samples `point_count` points uniformly over `full_domain`, endpoints included.
    #[must_use]
    pub fn sample(self, full_domain: (f64, f64)) -> Vec<Point> {
        let (start, end) = full_domain;
        let count = self.point_count;
        let step = if count > 1 {
            (end - start) / (count - 1) as f64
        } else {
            0.0
        };
        (0..count)
            .map(|index| Point::new(start + step * index as f64, self.value_at(index, count)))
            .collect()
    }
}

/// Loader over a [`SyntheticWave`]; reuses previous data whenever present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SyntheticLoader {
    wave: SyntheticWave,
}

impl SyntheticLoader {
    #[must_use]
    pub fn new(wave: SyntheticWave) -> Self {
        Self { wave }
    }

    #[must_use]
    pub fn wave(&self) -> SyntheticWave {
        self.wave
    }
}

impl SeriesLoader for SyntheticLoader {
    fn load(&mut self, request: &LoaderRequest) -> ChartResult<LoaderResponse> {
        let data = if request.has_previous_data() {
            request.previous_series_data.clone()
        } else {
            self.wave.sample(request.full_domain)
        };
        Ok(LoaderResponse::from_request(request, data))
    }
}

/// Adapts a closure returning points into a [`SeriesLoader`].
pub struct ClosureLoader<F> {
    fetch: F,
}

impl<F> ClosureLoader<F>
where
    F: FnMut(&LoaderRequest) -> ChartResult<Vec<Point>>,
{
    #[must_use]
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> SeriesLoader for ClosureLoader<F>
where
    F: FnMut(&LoaderRequest) -> ChartResult<Vec<Point>>,
{
    fn load(&mut self, request: &LoaderRequest) -> ChartResult<LoaderResponse> {
        let data = (self.fetch)(request).map_err(|err| match err {
            ChartError::Loader { .. } => err,
            other => ChartError::Loader {
                series: request.series_id,
                message: other.to_string(),
            },
        })?;
        Ok(LoaderResponse::from_request(request, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_count_uses_ceil_and_floor() {
        // 11 points over [0, 10]: indexes line up with integer timestamps.
        assert_eq!(visible_point_count((0.0, 10.0), (0.5, 3.5), 11), 3);
        assert_eq!(visible_point_count((0.0, 10.0), (0.0, 10.0), 11), 11);
        assert_eq!(visible_point_count((0.0, 10.0), (2.2, 2.8), 11), 0);
    }

    #[test]
    fn visible_count_clamps_to_series() {
        assert_eq!(visible_point_count((0.0, 10.0), (-5.0, 20.0), 11), 11);
        assert_eq!(visible_point_count((0.0, 10.0), (0.0, 1.0), 0), 0);
    }

    #[test]
    fn single_point_wave_stays_finite() {
        let points = SyntheticWave::default()
            .with_point_count(1)
            .sample((5.0, 10.0));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, 5.0);
        assert!(points[0].value.is_finite());
    }
}
