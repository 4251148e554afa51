use serde::{Deserialize, Serialize};

use crate::core::AxisId;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    /// Time of the engine call that emitted the event.
    pub now: f64,
    pub dataset_count: usize,
    pub realtime_axis_count: usize,
    pub paused_axis_count: usize,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    BeforeUpdate,
    AfterDatasetUpdate { dataset_index: usize },
    BeforeDraw,
    AxisPaused { axis: AxisId },
    AxisResumed { axis: AxisId },
    Refreshed { axis: AxisId },
    SamplesEvicted { axis: AxisId, dataset_index: usize, count: usize },
    Scrolled { axis: AxisId, offset: f64, min: f64, max: f64 },
    AfterDestroy,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe lifecycle and streaming events and read engine context
/// without mutating chart state directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
