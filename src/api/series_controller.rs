use tracing::debug;

use crate::core::{Series, SeriesId, SeriesLoader, VerticalRescale};
use crate::error::{ChartError, ChartResult};

use super::engine::SeriesSlot;
use super::{ChartEngine, PluginEvent};

impl ChartEngine {
    /// Registers a series with the loader that feeds it.
    ///
    /// Points already on `series` are handed to the loader as previous data
    /// on the first load. Adding a series narrows the plot by one axis width.
    pub fn add_series(
        &mut self,
        series: Series,
        loader: Box<dyn SeriesLoader>,
    ) -> ChartResult<()> {
        let series_id = series.id();
        if self.series.contains_key(&series_id) {
            return Err(ChartError::DuplicateSeries(series_id));
        }

        self.sync.add_series(series_id)?;
        debug!(
            series = %series_id,
            points_len = series.points().len(),
            chart_width = self.sync.chart_width(),
            "add series"
        );
        self.series.insert(
            series_id,
            SeriesSlot {
                series,
                loader,
                should_draw_point_markers: false,
            },
        );

        self.emit_plugin_event(PluginEvent::SeriesAdded { series_id });
        self.after_layout_change()
    }

    /// Removes a series; in-flight loads for it become stale.
    pub fn remove_series(&mut self, series_id: SeriesId) -> ChartResult<Series> {
        let slot = self
            .series
            .shift_remove(&series_id)
            .ok_or(ChartError::UnknownSeries(series_id))?;
        self.sync.remove_series(series_id)?;
        self.sequencer.forget(series_id);
        debug!(series = %series_id, chart_width = self.sync.chart_width(), "remove series");

        self.emit_plugin_event(PluginEvent::SeriesRemoved { series_id });
        self.after_layout_change()?;
        Ok(slot.series)
    }

    /// Stores an independent vertical rescale for one series.
    pub fn update_series_rescale(
        &mut self,
        series_id: SeriesId,
        rescale: VerticalRescale,
    ) -> ChartResult<()> {
        self.sync.update_series_rescale(series_id, rescale)?;
        self.emit_plugin_event(PluginEvent::SeriesRescaled { series_id });
        Ok(())
    }

    pub fn reset_series_rescale(&mut self, series_id: SeriesId) -> ChartResult<()> {
        self.update_series_rescale(series_id, VerticalRescale::IDENTITY)
    }
}
