use crate::extensions::{PluginContext, PluginEvent};
use crate::render::ChartRenderer;

use super::realtime_axis::AxisState;
use super::{StreamingEngine, TimerHost};

impl<R: ChartRenderer, H: TimerHost> StreamingEngine<R, H> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            now: self.now,
            dataset_count: self.chart.datasets.len(),
            realtime_axis_count: self.axes.len(),
            paused_axis_count: self
                .axes
                .values()
                .filter(|axis| axis.state() == AxisState::Paused)
                .count(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event.clone(), context);
        }
    }
}
