use tracing::debug;

use crate::core::{AxisGeometry, AxisId};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{
    AnnotationScale, WindowSpan, ZoomLimits, pan_delay, zoom_max_percent, zoom_span,
};
use crate::render::ChartRenderer;

use super::{RealtimeOverrides, StreamingEngine, TimerHost};

impl<R: ChartRenderer, H: TimerHost> StreamingEngine<R, H> {
    /// Zooms a realtime axis by `factor` around the pixel `(center_x, center_y)`.
    ///
    /// Writes the new duration and delay as per-axis overrides. Returns
    /// whether the new duration differs from the currently displayed span.
    pub fn zoom_realtime_axis(
        &mut self,
        axis_id: &AxisId,
        factor: f64,
        center_x: f64,
        center_y: f64,
        limits: ZoomLimits,
    ) -> ChartResult<bool> {
        if !factor.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite".to_owned(),
            ));
        }
        let geometry = self.realtime_geometry(axis_id)?;
        self.store_zoom_originals();

        let axis = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))?;
        let options = axis.options();
        let max_percent = zoom_max_percent(geometry, center_x, center_y);
        let span = zoom_span(
            WindowSpan::new(options.duration, options.delay),
            factor,
            max_percent,
            limits,
        );

        let overrides = RealtimeOverrides {
            duration: Some(span.duration),
            delay: Some(span.delay),
            ..axis.axis_options().realtime
        };
        axis.set_overrides(overrides, &self.defaults)?;
        let (min, max) = axis.bounds();
        debug!(axis = %axis_id, factor, duration = span.duration, delay = span.delay, "zoomed realtime axis");
        Ok(span.duration != max - min)
    }

    /// Pans a realtime axis by `delta_px` pixels along its direction.
    pub fn pan_realtime_axis(
        &mut self,
        axis_id: &AxisId,
        delta_px: f64,
        limits: ZoomLimits,
    ) -> ChartResult<bool> {
        let geometry = self.realtime_geometry(axis_id)?;
        self.store_zoom_originals();

        let axis = self
            .axes
            .get_mut(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))?;
        let (min, max) = axis.bounds();
        let value_delta =
            geometry.value_for_pixel(delta_px, min, max) - geometry.value_for_pixel(0.0, min, max);
        let delay = pan_delay(axis.options().delay, value_delta, limits);

        let overrides = RealtimeOverrides {
            delay: Some(delay),
            ..axis.axis_options().realtime
        };
        axis.set_overrides(overrides, &self.defaults)?;
        debug!(axis = %axis_id, delta_px, delay, "panned realtime axis");
        Ok(true)
    }

    /// Restores every realtime axis' duration and delay to their values before
    /// the first zoom or pan; axes never zoomed lose their duration and delay
    /// overrides.
    pub fn reset_zoom(&mut self) -> ChartResult<()> {
        let axes = &self.axes;
        self.zoom_originals
            .retain(|axis_id, _| axes.contains_key(axis_id));
        for (axis_id, axis) in &mut self.axes {
            let original = self.zoom_originals.get(axis_id).copied();
            let overrides = RealtimeOverrides {
                duration: original.map(|span| span.duration),
                delay: original.map(|span| span.delay),
                ..axis.axis_options().realtime
            };
            axis.set_overrides(overrides, &self.defaults)?;
        }
        debug!(axes = self.axes.len(), "reset realtime zoom");
        Ok(())
    }

    /// Scale description of a realtime axis for annotation binding builders.
    pub fn annotation_scale(&self, axis_id: &AxisId) -> ChartResult<AnnotationScale> {
        let geometry = self.realtime_geometry(axis_id)?;
        let axis = self
            .axes
            .get(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))?;
        let (min, max) = axis.bounds();
        Ok(AnnotationScale::new(axis_id.clone(), geometry, min, max))
    }

    fn realtime_geometry(&self, axis_id: &AxisId) -> ChartResult<AxisGeometry> {
        if !self.axes.contains_key(axis_id) {
            return Err(ChartError::UnknownAxis(axis_id.to_string()));
        }
        self.chart
            .axis_geometry(axis_id)
            .ok_or_else(|| ChartError::UnknownAxis(axis_id.to_string()))
    }

    // Captures resolved spans of axes seen for the first time; forgets removed axes.
    fn store_zoom_originals(&mut self) {
        for (axis_id, axis) in &self.axes {
            if !self.zoom_originals.contains_key(axis_id) {
                let options = axis.options();
                self.zoom_originals
                    .insert(axis_id.clone(), WindowSpan::new(options.duration, options.delay));
            }
        }
        let axes = &self.axes;
        self.zoom_originals
            .retain(|axis_id, _| axes.contains_key(axis_id));
    }
}
