use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::core::loader::DEFAULT_POINT_BUDGET;
use crate::core::simplify::DEFAULT_TOLERANCE;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DEFAULT_SCALE_EXTENT, Margins, SyncConfig};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every default lives here; the
/// engine has no shared mutable defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    /// Total chart width (axes and margins included) and plot height.
    pub viewport: Viewport,
    pub time_start: f64,
    pub time_end: f64,
    #[serde(default)]
    pub axis_width: f64,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_scale_extent")]
    pub scale_extent: (f64, f64),
    #[serde(default = "default_point_budget")]
    pub point_budget: usize,
    #[serde(default = "default_simplify_tolerance")]
    pub simplify_tolerance: f64,
    #[serde(default)]
    pub highest_quality: bool,
}

impl ChartEngineConfig {
    /// Creates a minimal config over `[time_start, time_end]`.
    #[must_use]
    pub fn new(viewport: Viewport, time_start: f64, time_end: f64) -> Self {
        Self {
            viewport,
            time_start,
            time_end,
            axis_width: 0.0,
            margins: Margins::default(),
            scale_extent: default_scale_extent(),
            point_budget: default_point_budget(),
            simplify_tolerance: default_simplify_tolerance(),
            highest_quality: false,
        }
    }

    /// Sets the width reserved per series value axis.
    #[must_use]
    pub fn with_axis_width(mut self, axis_width: f64) -> Self {
        self.axis_width = axis_width;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, left: f64, right: f64) -> Self {
        self.margins = Margins::new(left, right);
        self
    }

    /// Sets min/max zoom ratio relative to the full domain.
    #[must_use]
    pub fn with_scale_extent(mut self, min: f64, max: f64) -> Self {
        self.scale_extent = (min, max);
        self
    }

    #[must_use]
    pub fn with_point_budget(mut self, point_budget: usize) -> Self {
        self.point_budget = point_budget;
        self
    }

    #[must_use]
    pub fn with_simplify_tolerance(mut self, tolerance: f64) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_highest_quality(mut self, highest_quality: bool) -> Self {
        self.highest_quality = highest_quality;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "viewport must be finite and positive: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !self.time_start.is_finite() || !self.time_end.is_finite() {
            return Err(ChartError::InvalidData(
                "time range must be finite".to_owned(),
            ));
        }
        if self.time_start > self.time_end {
            return Err(ChartError::InvalidRange {
                start: self.time_start,
                end: self.time_end,
            });
        }
        if self.point_budget == 0 {
            return Err(ChartError::InvalidData(
                "point budget must be > 0".to_owned(),
            ));
        }
        if !self.simplify_tolerance.is_finite() || self.simplify_tolerance < 0.0 {
            return Err(ChartError::InvalidData(
                "simplify tolerance must be finite and >= 0".to_owned(),
            ));
        }
        self.sync_config().validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn sync_config(self) -> SyncConfig {
        SyncConfig {
            total_width: self.viewport.width,
            axis_width: self.axis_width,
            margins: self.margins,
            scale_extent: self.scale_extent,
        }
    }
}

fn default_scale_extent() -> (f64, f64) {
    DEFAULT_SCALE_EXTENT
}

fn default_point_budget() -> usize {
    DEFAULT_POINT_BUDGET
}

fn default_simplify_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
