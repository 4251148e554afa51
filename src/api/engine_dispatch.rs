use tracing::trace;

use crate::error::ChartResult;
use crate::extensions::PluginEvent;
use crate::render::{ChartRenderer, UpdateMode};

use super::{Clock, ManualTimerHost, StreamingEngine, TimerEvent, TimerHandle, TimerHost};

impl<R: ChartRenderer, H: TimerHost> StreamingEngine<R, H> {
    /// Routes a fired animation frame to the axis owning `handle`.
    ///
    /// Returns `true` when an axis scrolled and the chart was rendered.
    pub fn dispatch_animation_frame(&mut self, handle: TimerHandle, now: f64) -> ChartResult<bool> {
        if self.destroyed {
            return Ok(false);
        }
        let Some((axis_id, axis)) = self
            .axes
            .iter_mut()
            .find(|(_, axis)| axis.frame_handle() == Some(handle))
        else {
            trace!(handle = handle.raw(), "ignoring stale animation frame");
            return Ok(false);
        };
        self.now = self.now.max(now);

        let Some(outcome) = axis.on_animation_frame(&mut self.host, handle, &mut self.chart, now)
        else {
            return Ok(false);
        };
        let axis_id = axis_id.clone();

        self.emit_plugin_event(PluginEvent::Scrolled {
            axis: axis_id,
            offset: outcome.offset,
            min: outcome.min,
            max: outcome.max,
        });
        self.emit_plugin_event(PluginEvent::BeforeDraw);
        self.renderer.render(&self.chart)?;
        Ok(true)
    }

    /// Routes a fired interval to the axis owning `handle`.
    ///
    /// Runs the refresh callback, evicts expired samples and relayouts quietly.
    /// Returns `true` when a refresh tick ran.
    pub fn dispatch_interval(&mut self, handle: TimerHandle, now: f64) -> ChartResult<bool> {
        if self.destroyed {
            return Ok(false);
        }
        let Some((axis_id, axis)) = self
            .axes
            .iter_mut()
            .find(|(_, axis)| axis.data_handle() == Some(handle))
        else {
            trace!(handle = handle.raw(), "ignoring stale interval");
            return Ok(false);
        };
        self.now = self.now.max(now);

        let on_refresh = &mut self.on_refresh;
        let Some(report) = axis.on_interval(&mut self.host, handle, &mut self.chart, now, |chart| {
            if let Some(callback) = on_refresh.as_mut() {
                callback(chart);
            }
        }) else {
            return Ok(false);
        };
        let axis_id = axis_id.clone();

        self.emit_plugin_event(PluginEvent::Refreshed {
            axis: axis_id.clone(),
        });
        for eviction in &report.evictions {
            self.emit_plugin_event(PluginEvent::SamplesEvicted {
                axis: axis_id.clone(),
                dataset_index: eviction.dataset_index,
                count: eviction.count,
            });
        }
        self.run_update(now, UpdateMode::Quiet)?;
        Ok(true)
    }

    pub fn dispatch(&mut self, event: TimerEvent, now: f64) -> ChartResult<bool> {
        match event {
            TimerEvent::AnimationFrame(handle) => self.dispatch_animation_frame(handle, now),
            TimerEvent::Interval(handle) => self.dispatch_interval(handle, now),
        }
    }

    /// Routes a platform timer event stamped with the clock's current time.
    pub fn dispatch_with_clock<C: Clock + ?Sized>(
        &mut self,
        event: TimerEvent,
        clock: &C,
    ) -> ChartResult<bool> {
        self.dispatch(event, clock.now_ms())
    }

    /// Layout pass at the clock's current time.
    pub fn update_with_clock<C: Clock + ?Sized>(&mut self, clock: &C) -> ChartResult<()> {
        self.update(clock.now_ms())
    }
}

impl<R: ChartRenderer> StreamingEngine<R, ManualTimerHost> {
    /// Advances the manual host to `now` and dispatches every due event.
    ///
    /// Returns the number of events that did work.
    pub fn pump(&mut self, now: f64) -> ChartResult<usize> {
        let events = self.host.due_events(now);
        let mut handled = 0;
        for event in events {
            if self.dispatch(event, now)? {
                handled += 1;
            }
        }
        Ok(handled)
    }

    /// Pumps due events at the clock's current time.
    pub fn pump_clock<C: Clock + ?Sized>(&mut self, clock: &C) -> ChartResult<usize> {
        self.pump(clock.now_ms())
    }
}
