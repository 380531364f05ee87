use indexmap::IndexMap;

use crate::core::{
    Domain, LinearScale, RequestSequencer, Series, SeriesId, SeriesLoader, Transform,
    VerticalRescale,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::interaction::{InteractionMode, RenderNotification, ZoomSynchronizer};

use super::ChartEngineConfig;

pub(super) struct SeriesSlot {
    pub(super) series: Series,
    pub(super) loader: Box<dyn SeriesLoader>,
    pub(super) should_draw_point_markers: bool,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the full and visible domains, the shared zoom state,
/// every series with its loader, and the request sequencer. Drawing is left
/// to the host, which reads [`super::RenderSnapshot`]s.
pub struct ChartEngine {
    pub(super) config: ChartEngineConfig,
    pub(super) sync: ZoomSynchronizer,
    pub(super) full_domain: Domain,
    pub(super) visible_domain: Domain,
    pub(super) pending_visible_domain: Option<Domain>,
    pub(super) series: IndexMap<SeriesId, SeriesSlot>,
    pub(super) sequencer: RequestSequencer,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl ChartEngine {
    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn full_domain(&self) -> Domain {
        self.full_domain
    }

    #[must_use]
    pub fn visible_domain(&self) -> Domain {
        self.visible_domain
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.sync.transform()
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.sync.chart_width()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.sync.interaction_mode()
    }

    #[must_use]
    pub fn synchronizer(&self) -> &ZoomSynchronizer {
        &self.sync
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Series ids in insertion order.
    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.series.keys().copied().collect()
    }

    #[must_use]
    pub fn series(&self, series_id: SeriesId) -> Option<&Series> {
        self.series.get(&series_id).map(|slot| &slot.series)
    }

    #[must_use]
    pub fn series_rescale(&self, series_id: SeriesId) -> Option<VerticalRescale> {
        self.sync.series_rescale(series_id)
    }

    /// Marker hint from the last applied loader response.
    #[must_use]
    pub fn should_draw_point_markers(&self, series_id: SeriesId) -> Option<bool> {
        self.series
            .get(&series_id)
            .map(|slot| slot.should_draw_point_markers)
    }

    /// Zoomed time scale over `[0, chart_width]`.
    pub fn time_scale(&self) -> ChartResult<LinearScale> {
        self.sync.time_scale()
    }

    /// Value scale of one series after its vertical rescale.
    pub fn value_scale(&self, series_id: SeriesId) -> ChartResult<LinearScale> {
        let slot = self
            .series
            .get(&series_id)
            .ok_or(ChartError::UnknownSeries(series_id))?;
        let rescale = self.sync.series_rescale(series_id).unwrap_or_default();
        let base = slot
            .series
            .scale((self.config.viewport.height, 0.0))?;
        rescale.rescale(base)
    }

    /// Drains redraw notifications accumulated since the last call.
    pub fn take_render_notifications(&mut self) -> Vec<RenderNotification> {
        self.sync.take_notifications()
    }
}
