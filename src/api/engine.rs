use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::{AxisGeometry, AxisId, PixelRect};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginEvent, WindowSpan};
use crate::render::{ChartRenderer, UpdateMode};

use super::realtime_axis::AxisState;
use super::tick_generator::TickSet;
use super::validation::{validate_axis_geometry, validate_streaming_options};
use super::{
    RealTimeAxis, RealtimeAxisOptions, RealtimeOverrides, StreamingChart, StreamingConfig,
    StreamingOptions, TickSource, TimerHost,
};

/// Callback run once per data-refresh tick, before expired samples are evicted.
pub type RefreshCallback = Box<dyn FnMut(&mut StreamingChart)>;

/// Main orchestration facade consumed by host applications.
///
/// `StreamingEngine` owns the chart model, one [`RealTimeAxis`] per realtime
/// axis, the timer host that drives them and the renderer they feed.
pub struct StreamingEngine<R: ChartRenderer, H: TimerHost> {
    pub(super) renderer: R,
    pub(super) host: H,
    pub(super) chart: StreamingChart,
    pub(super) defaults: StreamingOptions,
    pub(super) axes: IndexMap<AxisId, RealTimeAxis>,
    pub(super) on_refresh: Option<RefreshCallback>,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) zoom_originals: IndexMap<AxisId, WindowSpan>,
    pub(super) now: f64,
    pub(super) destroyed: bool,
}

impl<R: ChartRenderer, H: TimerHost> StreamingEngine<R, H> {
    pub fn new(renderer: R, host: H, options: StreamingOptions) -> ChartResult<Self> {
        let defaults = validate_streaming_options(options)?;
        Ok(Self {
            renderer,
            host,
            chart: StreamingChart::default(),
            defaults,
            axes: IndexMap::new(),
            on_refresh: None,
            plugins: Vec::new(),
            zoom_originals: IndexMap::new(),
            now: 0.0,
            destroyed: false,
        })
    }

    /// Builds an engine from a loaded configuration, registering every
    /// configured axis.
    ///
    /// Axes start with an empty horizontal geometry; call
    /// [`Self::set_axis_geometry`] once the layout is known.
    pub fn from_config(renderer: R, host: H, config: &StreamingConfig) -> ChartResult<Self> {
        let mut engine = Self::new(renderer, host, config.streaming)?;
        for (axis_id, axis_options) in &config.axes {
            engine.add_realtime_axis(
                axis_id.clone(),
                AxisGeometry::horizontal(0.0, 0.0),
                *axis_options,
            )?;
        }
        Ok(engine)
    }

    /// Replaces the chart model, e.g. one prepared with datasets and layout.
    #[must_use]
    pub fn with_chart(mut self, chart: StreamingChart) -> Self {
        self.chart = chart;
        self
    }

    #[must_use]
    pub fn chart(&self) -> &StreamingChart {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut StreamingChart {
        &mut self.chart
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn streaming_options(&self) -> StreamingOptions {
        self.defaults
    }

    /// Latest time seen by `update` or a timer dispatch.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn realtime_axis(&self, axis_id: &AxisId) -> Option<&RealTimeAxis> {
        self.axes.get(axis_id)
    }

    pub fn realtime_axis_ids(&self) -> impl Iterator<Item = &AxisId> {
        self.axes.keys()
    }

    /// Registers a realtime axis and starts its data-refresh timer.
    pub fn add_realtime_axis(
        &mut self,
        axis_id: impl Into<AxisId>,
        geometry: AxisGeometry,
        axis_options: RealtimeAxisOptions,
    ) -> ChartResult<()> {
        let axis_id = axis_id.into();
        if self.destroyed {
            return Err(ChartError::InvalidData(
                "cannot add a realtime axis to a destroyed engine".to_owned(),
            ));
        }
        if self.axes.contains_key(&axis_id) {
            return Err(ChartError::InvalidData(format!(
                "realtime axis `{axis_id}` is already registered"
            )));
        }
        let geometry = validate_axis_geometry(geometry)?;
        let mut axis = RealTimeAxis::new(axis_id.clone(), axis_options, &self.defaults, self.now)?;
        axis.init(&mut self.host);
        self.chart.set_axis_geometry(axis_id.clone(), geometry);
        info!(axis = %axis_id, "added realtime axis");
        self.axes.insert(axis_id, axis);
        Ok(())
    }

    /// Updates the laid-out box of an axis.
    pub fn set_axis_geometry(
        &mut self,
        axis_id: impl Into<AxisId>,
        geometry: AxisGeometry,
    ) -> ChartResult<()> {
        let geometry = validate_axis_geometry(geometry)?;
        self.chart.set_axis_geometry(axis_id, geometry);
        Ok(())
    }

    pub fn set_on_refresh<F>(&mut self, callback: F)
    where
        F: FnMut(&mut StreamingChart) + 'static,
    {
        self.on_refresh = Some(Box::new(callback));
    }

    pub fn clear_on_refresh(&mut self) {
        self.on_refresh = None;
    }

    /// Replaces the chart-wide defaults and re-resolves every axis.
    pub fn set_streaming_options(&mut self, options: StreamingOptions) -> ChartResult<()> {
        let defaults = validate_streaming_options(options)?;
        for axis in self.axes.values_mut() {
            axis.refresh_defaults(&defaults)?;
        }
        self.defaults = defaults;
        Ok(())
    }

    pub fn set_axis_overrides(
        &mut self,
        axis_id: &AxisId,
        overrides: RealtimeOverrides,
    ) -> ChartResult<()> {
        let axis = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))?;
        axis.set_overrides(overrides, &self.defaults)
    }

    /// Runs a layout pass at `now`.
    ///
    /// Applies each axis' pause option to its frame timer, asks the renderer
    /// to relayout and rebuilds element axis bindings from the new layout.
    pub fn update(&mut self, now: f64) -> ChartResult<()> {
        self.run_update(now, UpdateMode::Default)
    }

    pub(super) fn run_update(&mut self, now: f64, mode: UpdateMode) -> ChartResult<()> {
        if self.destroyed {
            return Ok(());
        }
        self.observe_time(now);
        self.emit_plugin_event(PluginEvent::BeforeUpdate);

        let mut transitions = Vec::new();
        for (axis_id, axis) in &mut self.axes {
            let before = axis.state();
            axis.update(&mut self.host, now);
            match (before, axis.state()) {
                (AxisState::Running, AxisState::Paused) => {
                    transitions.push(PluginEvent::AxisPaused {
                        axis: axis_id.clone(),
                    });
                }
                (AxisState::Paused, AxisState::Running) => {
                    transitions.push(PluginEvent::AxisResumed {
                        axis: axis_id.clone(),
                    });
                }
                _ => {}
            }
        }
        for event in transitions {
            self.emit_plugin_event(event);
        }

        self.renderer.update(&mut self.chart, mode)?;

        for dataset_index in 0..self.chart.metas.len() {
            self.chart.metas[dataset_index].rebuild_bindings();
            self.emit_plugin_event(PluginEvent::AfterDatasetUpdate { dataset_index });
        }
        debug!(now, ?mode, datasets = self.chart.metas.len(), "chart updated");
        Ok(())
    }

    /// Generates ticks for a realtime axis at its current head.
    ///
    /// `capacity` is the number of labels the axis can display; see
    /// [`crate::api::label_capacity`].
    pub fn build_ticks(&mut self, axis_id: &AxisId, capacity: usize) -> ChartResult<TickSet> {
        let axis = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))?;
        let time = axis.axis_options().time;
        let timestamps = match time.source {
            TickSource::Data => Some(self.chart.data_timestamps(axis_id, time.round)),
            TickSource::Auto => None,
        };
        axis.build_ticks(capacity, timestamps.as_deref())
    }

    /// Clip rectangle for drawing a dataset: the chart area along realtime
    /// dimensions, the whole canvas along the others.
    pub fn dataset_clip_area(&self, dataset_index: usize) -> ChartResult<PixelRect> {
        let meta = self.chart.meta(dataset_index).ok_or_else(|| {
            ChartError::InvalidData(format!("dataset index {dataset_index} is out of range"))
        })?;
        let canvas = self.chart.canvas;
        let area = self.chart.chart_area;
        let mut clip = PixelRect::new(0.0, 0.0, canvas.width(), canvas.height());
        if self.axes.contains_key(&meta.x_axis_id) {
            clip.left = area.left;
            clip.right = area.right;
        }
        if self.axes.contains_key(&meta.y_axis_id) {
            clip.top = area.top;
            clip.bottom = area.bottom;
        }
        Ok(clip)
    }

    /// Clip rectangle for drawing a realtime axis, so scrolled labels never
    /// spill past the chart area along the axis direction.
    pub fn axis_clip_area(&self, axis_id: &AxisId) -> ChartResult<PixelRect> {
        if !self.axes.contains_key(axis_id) {
            return Err(ChartError::UnknownAxis(axis_id.to_string()));
        }
        let geometry = self
            .chart
            .axis_geometry(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))?;
        let canvas = self.chart.canvas;
        let area = self.chart.chart_area;
        Ok(if geometry.is_horizontal() {
            PixelRect::new(area.left, 0.0, area.right, canvas.height())
        } else {
            PixelRect::new(0.0, area.top, canvas.width(), area.bottom)
        })
    }

    /// Stops every timer. Later timer events are ignored and updates are no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for axis in self.axes.values_mut() {
            axis.destroy(&mut self.host);
        }
        self.destroyed = true;
        info!(axes = self.axes.len(), "destroyed streaming engine");
        self.emit_plugin_event(PluginEvent::AfterDestroy);
    }

    pub(super) fn observe_time(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }
}
