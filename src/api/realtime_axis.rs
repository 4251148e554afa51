use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{AxisGeometry, AxisId, TimeWindow};
use crate::error::ChartResult;

use super::retention_policy::{RetentionReport, evict_expired};
use super::tick_generator::{TickRequest, TickSet, generate_ticks};
use super::validation::{validate_realtime_axis_options, validate_streaming_options};
use super::window_scroller::{ScrollOutcome, scroll_window};
use super::{
    DataRefreshTimer, FrameRefreshTimer, RealtimeAxisOptions, RealtimeOverrides, StreamingChart,
    StreamingOptions, TimerHandle, TimerHost,
};

/// Lifecycle of a realtime axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisState {
    /// Created; no layout pass has run yet.
    Idle,
    /// Frame timer active, window advancing.
    Running,
    /// Frame timer stopped, window frozen.
    Paused,
    /// Timers released; events are ignored.
    Destroyed,
}

/// Per-axis realtime context: window state, resolved options and timers.
#[derive(Debug)]
pub struct RealTimeAxis {
    id: AxisId,
    axis_options: RealtimeAxisOptions,
    options: StreamingOptions,
    window: TimeWindow,
    bounds: (f64, f64),
    frame_timer: FrameRefreshTimer,
    data_timer: DataRefreshTimer,
    state: AxisState,
}

impl RealTimeAxis {
    pub fn new(
        id: impl Into<AxisId>,
        axis_options: RealtimeAxisOptions,
        defaults: &StreamingOptions,
        now: f64,
    ) -> ChartResult<Self> {
        let axis_options = validate_realtime_axis_options(axis_options)?;
        let options = validate_streaming_options(axis_options.realtime.resolve(defaults))?;
        let window = TimeWindow::new(now, options.duration, options.delay, options.ttl);
        Ok(Self {
            id: id.into(),
            axis_options,
            options,
            window,
            bounds: window.bounds(),
            frame_timer: FrameRefreshTimer::default(),
            data_timer: DataRefreshTimer::default(),
            state: AxisState::Idle,
        })
    }

    #[must_use]
    pub fn id(&self) -> &AxisId {
        &self.id
    }

    #[must_use]
    pub fn axis_options(&self) -> RealtimeAxisOptions {
        self.axis_options
    }

    /// Effective options after per-axis overrides.
    #[must_use]
    pub fn options(&self) -> StreamingOptions {
        self.options
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Bounds last assigned by a tick build or a scroll step.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    #[must_use]
    pub fn state(&self) -> AxisState {
        self.state
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.options.pause
    }

    #[must_use]
    pub fn frame_handle(&self) -> Option<TimerHandle> {
        self.frame_timer.handle()
    }

    #[must_use]
    pub fn data_handle(&self) -> Option<TimerHandle> {
        self.data_timer.handle()
    }

    #[must_use]
    pub fn data_interval(&self) -> Option<f64> {
        self.data_timer.interval()
    }

    #[must_use]
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.frame_timer.owns(handle) || self.data_timer.owns(handle)
    }

    /// Replaces the per-axis overrides and re-resolves against `defaults`.
    ///
    /// The window keeps its head; only duration, delay and ttl change.
    pub fn set_overrides(
        &mut self,
        overrides: RealtimeOverrides,
        defaults: &StreamingOptions,
    ) -> ChartResult<()> {
        let axis_options = validate_realtime_axis_options(self.axis_options.with_realtime(overrides))?;
        let options = validate_streaming_options(overrides.resolve(defaults))?;
        self.axis_options = axis_options;
        self.apply_options(options);
        Ok(())
    }

    /// Re-resolves options after the chart-wide defaults changed.
    pub fn refresh_defaults(&mut self, defaults: &StreamingOptions) -> ChartResult<()> {
        let options = validate_streaming_options(self.axis_options.realtime.resolve(defaults))?;
        self.apply_options(options);
        Ok(())
    }

    fn apply_options(&mut self, options: StreamingOptions) {
        self.options = options;
        self.window
            .apply_options(options.duration, options.delay, options.ttl);
    }

    /// Starts the data-refresh timer. Re-initializing is a no-op.
    pub fn init<H: TimerHost + ?Sized>(&mut self, host: &mut H) -> Option<TimerHandle> {
        if self.state == AxisState::Destroyed {
            return None;
        }
        if let Some(handle) = self.data_timer.handle() {
            return Some(handle);
        }
        let handle = self.data_timer.start(host, self.options.refresh);
        info!(axis = %self.id, refresh = self.options.refresh, "initialized realtime axis");
        Some(handle)
    }

    /// Layout-pass hook: applies the pause option to the frame timer.
    ///
    /// Resuming resets the head to `now` so time spent paused is not scrolled.
    pub fn update<H: TimerHost + ?Sized>(&mut self, host: &mut H, now: f64) {
        if self.state == AxisState::Destroyed {
            return;
        }
        if self.options.pause {
            if self.frame_timer.is_running() {
                debug!(axis = %self.id, head = self.window.head(), "pause realtime axis");
            }
            self.frame_timer.stop(host);
            self.state = AxisState::Paused;
        } else {
            if !self.frame_timer.is_running() {
                self.window.reset_head(now);
                debug!(axis = %self.id, head = now, "resume realtime axis");
            }
            self.frame_timer.start(host);
            self.state = AxisState::Running;
        }
    }

    /// Generates ticks for the window ending at the current head, then
    /// assigns the window bounds to the axis.
    pub fn build_ticks(
        &mut self,
        capacity: usize,
        timestamps: Option<&[f64]>,
    ) -> ChartResult<TickSet> {
        let (min, max) = self.window.bounds();
        let request = TickRequest::new(min, max, capacity)
            .with_refresh(self.options.refresh)
            .with_time(self.axis_options.time);
        let ticks = generate_ticks(&request, timestamps)?;
        self.bounds = (min, max);
        Ok(ticks)
    }

    /// Data-refresh tick: runs `on_refresh`, then evicts expired samples.
    ///
    /// Returns `None` when `handle` is not this axis' interval.
    pub fn on_interval<H, F>(
        &mut self,
        host: &mut H,
        handle: TimerHandle,
        chart: &mut StreamingChart,
        now: f64,
        on_refresh: F,
    ) -> Option<RetentionReport>
    where
        H: TimerHost + ?Sized,
        F: FnOnce(&mut StreamingChart),
    {
        if self.state == AxisState::Destroyed {
            return None;
        }
        let id = &self.id;
        let options = self.options;
        let window_max = self.bounds.1;
        let mut report = None;
        self.data_timer.on_interval(host, handle, || {
            on_refresh(chart);
            report = Some(evict_expired(chart, id, &options, window_max, now));
            options.refresh
        });
        report
    }

    /// Frame tick: scrolls bound elements and advances the window when due.
    ///
    /// Returns `None` when `handle` is not this axis' frame request or the
    /// frame deadline has not been reached.
    pub fn on_animation_frame<H: TimerHost + ?Sized>(
        &mut self,
        host: &mut H,
        handle: TimerHandle,
        chart: &mut StreamingChart,
        now: f64,
    ) -> Option<ScrollOutcome> {
        if self.state == AxisState::Destroyed {
            return None;
        }
        let geometry = chart
            .axis_geometry(&self.id)
            .unwrap_or_else(|| AxisGeometry::horizontal(0.0, 0.0));
        let id = &self.id;
        let window = &mut self.window;
        let frame_rate = self.options.frame_rate;
        let mut outcome = None;
        self.frame_timer.on_animation_frame(host, handle, now, || {
            outcome = Some(scroll_window(chart, id, geometry, window, now));
            frame_rate
        });
        if let Some(scrolled) = outcome {
            self.bounds = (scrolled.min, scrolled.max);
        }
        outcome
    }

    /// Stops both timers. Later events for their handles are ignored.
    pub fn destroy<H: TimerHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == AxisState::Destroyed {
            return;
        }
        self.frame_timer.stop(host);
        self.data_timer.stop(host);
        self.state = AxisState::Destroyed;
        info!(axis = %self.id, "destroyed realtime axis");
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisState, RealTimeAxis};
    use crate::api::{ManualTimerHost, RealtimeAxisOptions, RealtimeOverrides, StreamingOptions};

    fn axis(now: f64) -> RealTimeAxis {
        RealTimeAxis::new(
            "x",
            RealtimeAxisOptions::default(),
            &StreamingOptions::default(),
            now,
        )
        .expect("valid axis")
    }

    #[test]
    fn init_is_idempotent() {
        let mut host = ManualTimerHost::new(0.0);
        let mut axis = axis(0.0);
        let first = axis.init(&mut host);
        let second = axis.init(&mut host);
        assert_eq!(first, second);
        assert_eq!(host.active_interval_count(), 1);
    }

    #[test]
    fn resume_resets_head() {
        let mut host = ManualTimerHost::new(0.0);
        let mut axis = axis(1_000.0);
        axis.set_overrides(
            RealtimeOverrides {
                pause: Some(true),
                ..RealtimeOverrides::default()
            },
            &StreamingOptions::default(),
        )
        .expect("valid overrides");
        axis.update(&mut host, 2_000.0);
        assert_eq!(axis.state(), AxisState::Paused);
        assert_eq!(axis.window().head(), 1_000.0);

        axis.set_overrides(RealtimeOverrides::default(), &StreamingOptions::default())
            .expect("valid overrides");
        axis.update(&mut host, 9_000.0);
        assert_eq!(axis.state(), AxisState::Running);
        assert_eq!(axis.window().head(), 9_000.0);
        assert!(axis.frame_handle().is_some());
    }

    #[test]
    fn destroy_releases_timers() {
        let mut host = ManualTimerHost::new(0.0);
        let mut axis = axis(0.0);
        axis.init(&mut host);
        axis.update(&mut host, 0.0);
        axis.destroy(&mut host);

        assert_eq!(axis.state(), AxisState::Destroyed);
        assert_eq!(host.active_interval_count(), 0);
        assert!(host.pending_frame_requests().is_empty());
        assert!(axis.init(&mut host).is_none());
    }
}
