use crate::extensions::PluginContext;

use super::{ChartEngine, PluginEvent};

impl ChartEngine {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            full_range: self.full_domain.as_range(),
            visible_range: self.visible_domain.as_range(),
            visible_priority: self.visible_domain.priority(),
            transform: self.sync.transform(),
            series_count: self.series.len(),
            interaction_mode: self.sync.interaction_mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
