use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    Domain, LinearScale, Point, Series, SeriesId, Transform, VerticalRescale, simplify,
    visible_slice_with_neighbors,
};
use crate::error::ChartResult;

use super::ChartEngine;

#[cfg(feature = "parallel-simplify")]
use rayon::prelude::*;

/// Per-series drawing input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRenderData {
    pub series_id: SeriesId,
    pub label: String,
    /// Simplified points of the visible window, one neighbor past each edge.
    pub points: Vec<Point>,
    pub rescale: VerticalRescale,
    /// Rescaled value scale over `(plot_height, 0)`; `None` without data.
    pub value_scale: Option<LinearScale>,
    pub should_draw_point_markers: bool,
}

/// Everything a rendering collaborator needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub transform: Transform,
    pub full_domain: Domain,
    pub visible_domain: Domain,
    pub chart_width: f64,
    /// Zoomed time scale; `None` while the plot extent is degenerate.
    pub time_scale: Option<LinearScale>,
    pub series: Vec<SeriesRenderData>,
}

struct SeriesJob<'a> {
    series: &'a Series,
    rescale: VerticalRescale,
    should_draw_point_markers: bool,
}

struct SimplifyParams {
    window: (f64, f64),
    plot_height: f64,
    tolerance: f64,
    highest_quality: bool,
}

impl ChartEngine {
    /// Produces the frame input: shared transform, visible domain and the
    /// simplified, rescaled data of every series.
    pub fn render_snapshot(&self) -> ChartResult<RenderSnapshot> {
        let params = SimplifyParams {
            window: self.visible_domain.as_range(),
            plot_height: self.config.viewport.height,
            tolerance: self.config.simplify_tolerance,
            highest_quality: self.config.highest_quality,
        };
        let jobs: Vec<SeriesJob<'_>> = self
            .series
            .values()
            .map(|slot| SeriesJob {
                series: &slot.series,
                rescale: self
                    .sync
                    .series_rescale(slot.series.id())
                    .unwrap_or_default(),
                should_draw_point_markers: slot.should_draw_point_markers,
            })
            .collect();

        #[cfg(feature = "parallel-simplify")]
        let series: Vec<SeriesRenderData> = jobs
            .par_iter()
            .map(|job| build_series_render_data(job, &params))
            .collect();

        #[cfg(not(feature = "parallel-simplify"))]
        let series: Vec<SeriesRenderData> = jobs
            .iter()
            .map(|job| build_series_render_data(job, &params))
            .collect();

        trace!(series_len = series.len(), "render snapshot built");
        Ok(RenderSnapshot {
            transform: self.sync.transform(),
            full_domain: self.full_domain,
            visible_domain: self.visible_domain,
            chart_width: self.sync.chart_width(),
            time_scale: self.sync.time_scale().ok(),
            series,
        })
    }
}

fn build_series_render_data(job: &SeriesJob<'_>, params: &SimplifyParams) -> SeriesRenderData {
    let (start, end) = params.window;
    let visible = visible_slice_with_neighbors(job.series.points(), start, end);
    let points = simplify(visible, Some(params.tolerance), params.highest_quality);
    let value_scale = job
        .series
        .scale((params.plot_height, 0.0))
        .and_then(|base| job.rescale.rescale(base))
        .ok();

    SeriesRenderData {
        series_id: job.series.id(),
        label: job.series.label().to_owned(),
        points,
        rescale: job.rescale,
        value_scale,
        should_draw_point_markers: job.should_draw_point_markers,
    }
}
