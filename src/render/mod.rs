mod null_renderer;

pub use null_renderer::NullRenderer;

use serde::{Deserialize, Serialize};

use crate::api::StreamingChart;
use crate::error::ChartResult;

/// How a layout pass should treat element changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateMode {
    #[default]
    Default,
    /// Relayout without entrance or style animations, used after eviction.
    Quiet,
}

/// Contract implemented by the rendering layer that lays out and draws the chart.
///
/// `update` recomputes element geometry from the chart's datasets and axis
/// layout. `render` draws the current geometry; the realtime engine calls it
/// once per scroll step without a preceding `update`.
pub trait ChartRenderer {
    fn update(&mut self, chart: &mut StreamingChart, mode: UpdateMode) -> ChartResult<()>;
    fn render(&mut self, chart: &StreamingChart) -> ChartResult<()>;
}
