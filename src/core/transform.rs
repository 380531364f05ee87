use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::ChartResult;

/// Horizontal zoom transform: `x' = x * scale_factor + translate_x`.
///
/// `x` is a pixel coordinate produced by the base (full-domain) time scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale_factor: f64,
    pub translate_x: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale_factor: 1.0,
        translate_x: 0.0,
    };

    #[must_use]
    pub fn new(scale_factor: f64, translate_x: f64) -> Self {
        Self {
            scale_factor,
            translate_x,
        }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.scale_factor.is_finite() && self.translate_x.is_finite()
    }

    #[must_use]
    pub fn apply_x(self, x: f64) -> f64 {
        x * self.scale_factor + self.translate_x
    }

    #[must_use]
    pub fn invert_x(self, x: f64) -> f64 {
        (x - self.translate_x) / self.scale_factor
    }

    /// Derives the zoomed scale: same pixel range, domain narrowed to what the
    /// transformed range shows.
    pub fn rescale(self, base: LinearScale) -> ChartResult<LinearScale> {
        let (range_start, range_end) = base.range();
        base.with_domain((
            base.invert(self.invert_x(range_start)),
            base.invert(self.invert_x(range_end)),
        ))
    }
}

/// Independent vertical rescale of one series' value axis:
/// `y' = y * scale_factor + translate_y` in base pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalRescale {
    pub scale_factor: f64,
    pub translate_y: f64,
}

impl Default for VerticalRescale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl VerticalRescale {
    pub const IDENTITY: Self = Self {
        scale_factor: 1.0,
        translate_y: 0.0,
    };

    #[must_use]
    pub fn new(scale_factor: f64, translate_y: f64) -> Self {
        Self {
            scale_factor,
            translate_y,
        }
    }

    #[must_use]
    pub fn invert_y(self, y: f64) -> f64 {
        (y - self.translate_y) / self.scale_factor
    }

    pub fn rescale(self, base: LinearScale) -> ChartResult<LinearScale> {
        let (range_start, range_end) = base.range();
        base.with_domain((
            base.invert(self.invert_y(range_start)),
            base.invert(self.invert_y(range_end)),
        ))
    }
}
