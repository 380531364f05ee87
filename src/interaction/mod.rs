//! Shared horizontal zoom state plus independent per-series vertical rescales.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    LinearScale, SeriesId, Transform, VerticalRescale, compute_visible_window,
};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_SCALE_EXTENT: (f64, f64) = (1.0, 1000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Active,
    /// Plot width collapsed to zero or below; gestures are ignored until
    /// layout yields a usable extent again.
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
}

impl Margins {
    #[must_use]
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }
}

/// Layout inputs from which the plot extent is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub total_width: f64,
    /// Width reserved for each series' value axis.
    pub axis_width: f64,
    pub margins: Margins,
    /// Min/max zoom ratio relative to the full domain.
    pub scale_extent: (f64, f64),
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            total_width: 800.0,
            axis_width: 0.0,
            margins: Margins::default(),
            scale_extent: DEFAULT_SCALE_EXTENT,
        }
    }
}

impl SyncConfig {
    pub fn validate(self) -> ChartResult<Self> {
        let widths = [
            self.total_width,
            self.axis_width,
            self.margins.left,
            self.margins.right,
        ];
        if widths.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ChartError::InvalidData(
                "layout widths and margins must be finite and >= 0".to_owned(),
            ));
        }

        let (min, max) = self.scale_extent;
        if !min.is_finite() || !max.is_finite() || min < 1.0 || max < min {
            return Err(ChartError::InvalidData(
                "scale extent must be finite with 1 <= min <= max".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Redraw request scoped to the part of the chart that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderNotification {
    Layout,
    TimeAxis,
    SeriesAxis(SeriesId),
}

/// Owner of the one horizontal [`Transform`] shared by every series.
///
/// Each operation computes the complete next transform before storing it, so
/// callers never observe a new scale paired with a stale translation.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomSynchronizer {
    config: SyncConfig,
    full_domain: (f64, f64),
    series_count: usize,
    transform: Transform,
    rescales: IndexMap<SeriesId, VerticalRescale>,
    mode: InteractionMode,
    notifications: Vec<RenderNotification>,
}

impl ZoomSynchronizer {
    pub fn new(config: SyncConfig, full_domain: (f64, f64)) -> ChartResult<Self> {
        let config = config.validate()?;
        validate_range(full_domain)?;

        let mut sync = Self {
            config,
            full_domain,
            series_count: 0,
            transform: Transform::IDENTITY,
            rescales: IndexMap::new(),
            mode: InteractionMode::Active,
            notifications: Vec::new(),
        };
        sync.refresh_mode();
        Ok(sync)
    }

    #[must_use]
    pub fn config(&self) -> SyncConfig {
        self.config
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn full_domain(&self) -> (f64, f64) {
        self.full_domain
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series_count
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.mode
    }

    /// Plot width after axes and margins. May be zero or negative mid-layout.
    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.config.total_width
            - self.config.axis_width * self.series_count as f64
            - self.config.margins.horizontal()
    }

    pub fn chart_width_checked(&self) -> ChartResult<f64> {
        let width = self.chart_width();
        if width > 0.0 {
            Ok(width)
        } else {
            Err(ChartError::DegenerateExtent { width })
        }
    }

    /// Full-domain time scale over `[0, chart_width]`, before zoom.
    pub fn base_time_scale(&self) -> ChartResult<LinearScale> {
        let width = self.chart_width_checked()?;
        LinearScale::new(self.full_domain, (0.0, width))
    }

    /// Zoomed time scale: the base scale rescaled through the current transform.
    pub fn time_scale(&self) -> ChartResult<LinearScale> {
        self.transform.rescale(self.base_time_scale()?)
    }

    /// Time window currently shown. Falls back to the full domain when the
    /// extent is degenerate.
    #[must_use]
    pub fn visible_window(&self) -> (f64, f64) {
        let (full_start, full_end) = self.full_domain;
        self.time_scale()
            .map(|scale| {
                let (start, end) = scale.domain();
                (start.max(full_start), end.min(full_end))
            })
            .unwrap_or(self.full_domain)
    }

    /// Scale-factor bounds. The upper bound also keeps a visible window at
    /// least one base pixel of time wide.
    #[must_use]
    pub fn scale_factor_bounds(&self) -> (f64, f64) {
        let (min, max) = self.config.scale_extent;
        let pixel_limit = self.chart_width().max(min);
        (min, max.min(pixel_limit))
    }

    /// Recomputes the plot extent for a new number of series.
    ///
    /// The visible time window is kept across the change; the transform is
    /// re-derived for the new width.
    pub fn on_series_set_changed(&mut self, series_count: usize) {
        let window = self.visible_window();
        self.series_count = series_count;
        debug!(
            series_count,
            chart_width = self.chart_width(),
            "series set changed"
        );
        self.relayout(window);
    }

    /// Applies a host layout change of the total width.
    pub fn resize(&mut self, total_width: f64) -> ChartResult<()> {
        let config = SyncConfig {
            total_width,
            ..self.config
        }
        .validate()?;
        let window = self.visible_window();
        self.config = config;
        self.relayout(window);
        Ok(())
    }

    /// Replaces the full domain, keeping the visible window where it still fits.
    pub fn set_full_domain(&mut self, full_domain: (f64, f64)) -> ChartResult<()> {
        validate_range(full_domain)?;
        let window = self.visible_window();
        self.full_domain = full_domain;
        self.relayout(compute_visible_window(full_domain, window));
        Ok(())
    }

    /// Clamps a raw gesture transform into the current bounds and stores it.
    pub fn apply_zoom_delta(&mut self, raw: Transform) -> Transform {
        if self.mode == InteractionMode::Suspended {
            trace!("zoom gesture ignored while interaction is suspended");
            return self.store_transform(Transform::IDENTITY);
        }
        if !raw.is_finite() {
            warn!(?raw, "ignoring non-finite zoom transform");
            return self.transform;
        }

        let constrained = self.constrain(raw);
        self.store_transform(constrained)
    }

    /// Derives and stores the transform that shows `window`.
    pub fn set_visible_window(&mut self, window: (f64, f64)) -> ChartResult<Transform> {
        validate_range(window)?;
        let transform = self.transform_for_window(window);
        Ok(self.store_transform(transform))
    }

    pub fn add_series(&mut self, series_id: SeriesId) -> ChartResult<()> {
        if self.rescales.contains_key(&series_id) {
            return Err(ChartError::DuplicateSeries(series_id));
        }
        self.rescales.insert(series_id, VerticalRescale::IDENTITY);
        self.on_series_set_changed(self.rescales.len());
        Ok(())
    }

    pub fn remove_series(&mut self, series_id: SeriesId) -> ChartResult<()> {
        if self.rescales.shift_remove(&series_id).is_none() {
            return Err(ChartError::UnknownSeries(series_id));
        }
        self.on_series_set_changed(self.rescales.len());
        Ok(())
    }

    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.rescales.keys().copied().collect()
    }

    #[must_use]
    pub fn series_rescale(&self, series_id: SeriesId) -> Option<VerticalRescale> {
        self.rescales.get(&series_id).copied()
    }

    /// Stores one series' vertical rescale; other series and the shared
    /// horizontal transform are left untouched.
    pub fn update_series_rescale(
        &mut self,
        series_id: SeriesId,
        rescale: VerticalRescale,
    ) -> ChartResult<()> {
        if !rescale.scale_factor.is_finite()
            || !rescale.translate_y.is_finite()
            || rescale.scale_factor <= 0.0
        {
            return Err(ChartError::InvalidData(
                "vertical rescale must be finite with scale factor > 0".to_owned(),
            ));
        }

        let slot = self
            .rescales
            .get_mut(&series_id)
            .ok_or(ChartError::UnknownSeries(series_id))?;
        *slot = rescale;
        trace!(series = %series_id, ?rescale, "series rescale updated");
        self.notify(RenderNotification::SeriesAxis(series_id));
        Ok(())
    }

    /// Drains pending redraw notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<RenderNotification> {
        std::mem::take(&mut self.notifications)
    }

    fn constrain(&self, raw: Transform) -> Transform {
        let width = self.chart_width();
        let (min_k, max_k) = self.scale_factor_bounds();
        let scale_factor = raw.scale_factor.clamp(min_k, max_k);
        let translate_x = raw.translate_x.max(width * (1.0 - scale_factor)).min(0.0);
        Transform::new(scale_factor, translate_x)
    }

    fn transform_for_window(&self, window: (f64, f64)) -> Transform {
        let Ok(base) = self.base_time_scale() else {
            return Transform::IDENTITY;
        };
        let width = self.chart_width();
        let (start, end) = compute_visible_window(self.full_domain, window);
        let window_px = base.map(end) - base.map(start);
        let scale_factor = if window_px > 0.0 {
            width / window_px
        } else {
            self.scale_factor_bounds().1
        };

        self.constrain(Transform::new(scale_factor, -base.map(start) * scale_factor))
    }

    fn relayout(&mut self, window: (f64, f64)) {
        self.refresh_mode();
        let transform = self.transform_for_window(window);
        self.transform = transform;
        self.notify(RenderNotification::Layout);
    }

    fn refresh_mode(&mut self) {
        let degenerate =
            self.chart_width() <= 0.0 || self.full_domain.1 - self.full_domain.0 <= 0.0;
        let next = if degenerate {
            InteractionMode::Suspended
        } else {
            InteractionMode::Active
        };

        if next != self.mode {
            match next {
                InteractionMode::Suspended => warn!(
                    chart_width = self.chart_width(),
                    full_domain = ?self.full_domain,
                    "degenerate extent, zoom interaction suspended"
                ),
                InteractionMode::Active => debug!(
                    chart_width = self.chart_width(),
                    "extent restored, zoom interaction resumed"
                ),
            }
        }
        self.mode = next;
    }

    fn store_transform(&mut self, transform: Transform) -> Transform {
        if transform != self.transform {
            self.transform = transform;
            self.notify(RenderNotification::TimeAxis);
        }
        self.transform
    }

    fn notify(&mut self, notification: RenderNotification) {
        if !self.notifications.contains(&notification) {
            self.notifications.push(notification);
        }
    }
}

fn validate_range(range: (f64, f64)) -> ChartResult<()> {
    let (start, end) = range;
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData("range must be finite".to_owned()));
    }
    if start > end {
        return Err(ChartError::InvalidRange { start, end });
    }
    Ok(())
}
