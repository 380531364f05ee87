use indexmap::IndexMap;
use tracing::debug;

use crate::core::{Domain, DomainPriority, RequestSequencer};
use crate::error::ChartResult;
use crate::interaction::ZoomSynchronizer;

use super::{ChartEngine, ChartEngineConfig};

impl ChartEngine {
    /// Creates an engine showing the whole configured time range.
    ///
    /// Both domains start as [`DomainPriority::Placeholder`] so any
    /// programmatic or user selection replaces them.
    pub fn new(config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let full_domain = Domain::new(
            config.time_start,
            config.time_end,
            DomainPriority::Placeholder,
        )?;
        let sync = ZoomSynchronizer::new(config.sync_config(), full_domain.as_range())?;
        let visible_domain = Domain::from_range(sync.visible_window(), DomainPriority::Placeholder)?;

        debug!(
            time_start = config.time_start,
            time_end = config.time_end,
            chart_width = sync.chart_width(),
            "chart engine initialized"
        );

        Ok(Self {
            config,
            sync,
            full_domain,
            visible_domain,
            pending_visible_domain: None,
            series: IndexMap::new(),
            sequencer: RequestSequencer::new(),
            plugins: Vec::new(),
        })
    }
}
