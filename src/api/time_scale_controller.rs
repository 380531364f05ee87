use tracing::{debug, trace};

use crate::core::{Domain, DomainPriority, Transform, highest_priority_domain};
use crate::error::ChartResult;
use crate::interaction::InteractionMode;

use super::{ChartEngine, PluginEvent};

impl ChartEngine {
    /// Applies a raw zoom/pan transform produced by a user gesture.
    ///
    /// The transform is clamped by the synchronizer; the resulting window
    /// becomes the visible domain with [`DomainPriority::UserGenerated`].
    pub fn apply_zoom_gesture(&mut self, raw: Transform) -> ChartResult<Transform> {
        let transform = self.sync.apply_zoom_delta(raw);
        if self.sync.interaction_mode() == InteractionMode::Suspended {
            return Ok(transform);
        }

        self.replace_visible_domain(Domain::from_range(
            self.sync.visible_window(),
            DomainPriority::UserGenerated,
        )?);
        Ok(transform)
    }

    /// Proposes a visible range from any source.
    ///
    /// The proposal is applied unless the current selection outranks it; on
    /// equal priority the proposal wins. Returns `true` when applied. While
    /// interaction is suspended a winning proposal is held and applied once
    /// the layout recovers; the call then returns `false`.
    pub fn propose_visible_domain(&mut self, proposal: Domain) -> ChartResult<bool> {
        let current = self.pending_visible_domain.unwrap_or(self.visible_domain);
        let winner = highest_priority_domain([Some(proposal), Some(current)]);
        if winner != Some(proposal) {
            trace!(
                proposed = ?proposal.priority(),
                current = ?current.priority(),
                "visible domain proposal outranked"
            );
            return Ok(false);
        }

        if self.sync.interaction_mode() == InteractionMode::Suspended {
            debug!(
                start = proposal.start(),
                end = proposal.end(),
                priority = ?proposal.priority(),
                "visible domain proposal held until layout recovers"
            );
            self.pending_visible_domain = Some(proposal);
            return Ok(false);
        }

        self.apply_visible_domain(proposal)?;
        Ok(true)
    }

    /// Demotes the current selection so the next proposal of any priority wins.
    pub fn reset_visible_priority(&mut self) {
        self.visible_domain = self
            .visible_domain
            .with_priority(DomainPriority::Placeholder);
        self.pending_visible_domain = self
            .pending_visible_domain
            .map(|pending| pending.with_priority(DomainPriority::Placeholder));
    }

    /// Proposal held while interaction is suspended, if any.
    #[must_use]
    pub fn pending_visible_domain(&self) -> Option<Domain> {
        self.pending_visible_domain
    }

    /// Replaces the full time domain (e.g. after more history arrived).
    ///
    /// The visible window is kept when it still fits, shifted otherwise.
    pub fn set_full_domain(&mut self, full_domain: Domain) -> ChartResult<()> {
        self.sync.set_full_domain(full_domain.as_range())?;
        self.full_domain = full_domain;
        debug!(
            start = full_domain.start(),
            end = full_domain.end(),
            "full domain replaced"
        );
        self.emit_plugin_event(PluginEvent::FullRangeChanged {
            start: full_domain.start(),
            end: full_domain.end(),
        });
        self.settle_visible_domain()
    }

    /// Applies a host layout change of the total chart width.
    pub fn resize(&mut self, total_width: f64) -> ChartResult<()> {
        self.sync.resize(total_width)?;
        self.config.viewport.width = total_width;
        self.after_layout_change()
    }

    pub(super) fn after_layout_change(&mut self) -> ChartResult<()> {
        self.emit_plugin_event(PluginEvent::LayoutChanged {
            chart_width: self.sync.chart_width(),
        });
        self.settle_visible_domain()
    }

    /// Applies a held proposal once interaction is active again, otherwise
    /// follows the window the synchronizer kept.
    fn settle_visible_domain(&mut self) -> ChartResult<()> {
        if self.sync.interaction_mode() == InteractionMode::Active {
            if let Some(pending) = self.pending_visible_domain.take() {
                return self.apply_visible_domain(pending);
            }
        }
        self.sync_visible_domain_from_transform()
    }

    fn apply_visible_domain(&mut self, proposal: Domain) -> ChartResult<()> {
        self.sync.set_visible_window(proposal.as_range())?;
        self.replace_visible_domain(Domain::from_range(
            self.sync.visible_window(),
            proposal.priority(),
        )?);
        Ok(())
    }

    fn sync_visible_domain_from_transform(&mut self) -> ChartResult<()> {
        let domain = Domain::from_range(
            self.sync.visible_window(),
            self.visible_domain.priority(),
        )?;
        self.replace_visible_domain(domain);
        Ok(())
    }

    fn replace_visible_domain(&mut self, domain: Domain) {
        let changed = domain.as_range() != self.visible_domain.as_range();
        self.visible_domain = domain;
        if changed {
            let (start, end) = domain.as_range();
            trace!(start, end, priority = ?domain.priority(), "visible range changed");
            self.emit_plugin_event(PluginEvent::VisibleRangeChanged { start, end });
        }
    }
}
