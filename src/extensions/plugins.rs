use serde::{Deserialize, Serialize};

use crate::core::{DomainPriority, SeriesId, Transform};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub full_range: (f64, f64),
    pub visible_range: (f64, f64),
    pub visible_priority: DomainPriority,
    pub transform: Transform,
    pub series_count: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    SeriesAdded { series_id: SeriesId },
    SeriesRemoved { series_id: SeriesId },
    SeriesRescaled { series_id: SeriesId },
    DataUpdated { series_id: SeriesId, points_len: usize },
    StaleResponseDiscarded { series_id: SeriesId, sequence: u64 },
    VisibleRangeChanged { start: f64, end: f64 },
    FullRangeChanged { start: f64, end: f64 },
    LayoutChanged { chart_width: f64 },
}

/// Extension hook interface for bounded custom logic.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
