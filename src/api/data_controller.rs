use tracing::{debug, trace, warn};

use crate::core::{LoaderRequest, LoaderResponse, RequestTicket, SeriesId};
use crate::error::{ChartError, ChartResult};

use super::{ChartEngine, PluginEvent};

impl ChartEngine {
    /// Builds the request a loader would receive for the current window.
    pub fn loader_request(&self, series_id: SeriesId) -> ChartResult<LoaderRequest> {
        let slot = self
            .series
            .get(&series_id)
            .ok_or(ChartError::UnknownSeries(series_id))?;
        Ok(LoaderRequest {
            series_id,
            full_domain: self.full_domain.as_range(),
            visible_window: self.visible_domain.as_range(),
            point_budget: self.config.point_budget,
            previous_series_data: slot.series.points().to_vec(),
        })
    }

    /// Issues a new request for `series_id`, superseding any in flight.
    ///
    /// Hosts with asynchronous sources run the returned request themselves
    /// and hand the outcome to [`ChartEngine::complete_load`].
    pub fn begin_load(&mut self, series_id: SeriesId) -> ChartResult<(RequestTicket, LoaderRequest)> {
        let request = self.loader_request(series_id)?;
        let ticket = self.sequencer.issue(series_id);
        Ok((ticket, request))
    }

    /// Applies a loader response. Returns `false` when the ticket was
    /// superseded by a newer request and the response was discarded.
    pub fn complete_load(
        &mut self,
        ticket: RequestTicket,
        response: LoaderResponse,
    ) -> ChartResult<bool> {
        let series_id = ticket.series_id;
        if !self.sequencer.accept(ticket) {
            self.emit_plugin_event(PluginEvent::StaleResponseDiscarded {
                series_id,
                sequence: ticket.sequence,
            });
            return Ok(false);
        }

        let slot = self
            .series
            .get_mut(&series_id)
            .ok_or(ChartError::UnknownSeries(series_id))?;
        let original_count = response.data.len();
        slot.series.set_points(response.data);
        slot.should_draw_point_markers = response.should_draw_point_markers;
        let points_len = slot.series.points().len();
        debug!(
            series = %series_id,
            seq = ticket.sequence,
            original_count,
            canonical_count = points_len,
            markers = response.should_draw_point_markers,
            "applied loader response"
        );

        self.emit_plugin_event(PluginEvent::DataUpdated {
            series_id,
            points_len,
        });
        Ok(true)
    }

    /// Runs the series' own loader synchronously for the current window.
    pub fn load_series(&mut self, series_id: SeriesId) -> ChartResult<bool> {
        let (ticket, request) = self.begin_load(series_id)?;
        let slot = self
            .series
            .get_mut(&series_id)
            .ok_or(ChartError::UnknownSeries(series_id))?;
        trace!(
            series = %series_id,
            reuse = request.has_previous_data(),
            "invoking loader"
        );
        let response = slot.loader.load(&request).inspect_err(|err| {
            warn!(series = %series_id, error = %err, "loader failed");
        })?;
        self.complete_load(ticket, response)
    }

    /// Loads every series in insertion order, stopping at the first failure.
    pub fn load_all_series(&mut self) -> ChartResult<()> {
        for series_id in self.series_ids() {
            self.load_series(series_id)?;
        }
        Ok(())
    }
}
