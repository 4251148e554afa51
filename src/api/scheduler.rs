//! Repeating frame and data-refresh timers.
//!
//! The platform (a browser-like event loop, a GTK frame clock, a test harness)
//! is abstracted behind [`TimerHost`]: it hands out [`TimerHandle`]s and later
//! reports which handle fired. Each timer keeps its own handle bookkeeping and
//! re-arms itself; callers only supply the work callback at dispatch time and
//! its return value steers the next period.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::DEFAULT_FRAME_RATE;

/// Opaque identity of a scheduled frame request or interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Platform scheduling primitives consumed by the realtime timers.
///
/// Frame requests are one-shot: the host fires each at most once, on the next
/// available animation frame. Intervals repeat until cleared.
pub trait TimerHost {
    fn request_animation_frame(&mut self) -> TimerHandle;
    fn cancel_animation_frame(&mut self, handle: TimerHandle);
    fn set_interval(&mut self, period_ms: f64) -> TimerHandle;
    fn clear_interval(&mut self, handle: TimerHandle);
}

/// Frame duration for a requested rate; non-positive or non-finite rates fall
/// back to the default rate.
#[must_use]
pub fn frame_duration_ms(frame_rate: f64) -> f64 {
    let rate = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate
    } else {
        DEFAULT_FRAME_RATE
    };
    1_000.0 / rate
}

/// Frame-driven timer that runs its callback at most `frame_rate` times per second.
///
/// The raw animation-frame request re-arms on every frame; the callback only
/// runs once `next_refresh` is reached. Deadlines advance from the previous
/// deadline so the cadence does not drift, and snap to `now` when behind.
#[derive(Debug, Default)]
pub struct FrameRefreshTimer {
    request: Option<TimerHandle>,
    next_refresh: Option<f64>,
}

impl FrameRefreshTimer {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.request.is_some()
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.request
    }

    #[must_use]
    pub fn next_refresh(&self) -> Option<f64> {
        self.next_refresh
    }

    /// Arms the timer. Starting a running timer keeps the current request.
    pub fn start<H: TimerHost + ?Sized>(&mut self, host: &mut H) -> TimerHandle {
        if let Some(handle) = self.request {
            return handle;
        }
        let handle = host.request_animation_frame();
        debug!(handle = handle.raw(), "start frame refresh timer");
        self.request = Some(handle);
        handle
    }

    /// Cancels the pending frame request. Stopping a stopped timer is a no-op.
    pub fn stop<H: TimerHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.request.take() {
            host.cancel_animation_frame(handle);
            debug!(handle = handle.raw(), "stop frame refresh timer");
        }
    }

    #[must_use]
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.request == Some(handle)
    }

    /// Handles a fired animation frame.
    ///
    /// Runs `callback` when the deadline is due, then re-arms. The callback
    /// returns the desired frame rate. Returns `true` when the callback ran;
    /// frames for handles this timer does not own are ignored.
    pub fn on_animation_frame<H, F>(
        &mut self,
        host: &mut H,
        handle: TimerHandle,
        now: f64,
        callback: F,
    ) -> bool
    where
        H: TimerHost + ?Sized,
        F: FnOnce() -> f64,
    {
        if !self.owns(handle) {
            return false;
        }

        let next_refresh = self.next_refresh.unwrap_or(0.0);
        let due = next_refresh <= now;
        if due {
            let frame_duration = frame_duration_ms(callback());
            let candidate = next_refresh + frame_duration;
            self.next_refresh = Some(if candidate > now {
                candidate
            } else {
                now + frame_duration
            });
            trace!(now, next_refresh = self.next_refresh, "frame refresh tick");
        }

        self.request = Some(host.request_animation_frame());
        due
    }
}

/// Interval-driven timer whose callback returns the next desired period.
///
/// A changed, numeric period restarts the interval with that period.
#[derive(Debug, Default)]
pub struct DataRefreshTimer {
    timer: Option<TimerHandle>,
    interval: Option<f64>,
}

impl DataRefreshTimer {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn handle(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Period of the running interval.
    #[must_use]
    pub fn interval(&self) -> Option<f64> {
        self.interval
    }

    #[must_use]
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.timer == Some(handle)
    }

    /// Arms the interval. Starting a running timer keeps the current interval.
    pub fn start<H: TimerHost + ?Sized>(&mut self, host: &mut H, period_ms: f64) -> TimerHandle {
        if let Some(handle) = self.timer {
            return handle;
        }
        let period = if period_ms.is_finite() && period_ms > 0.0 {
            period_ms
        } else {
            0.0
        };
        let handle = host.set_interval(period);
        debug!(handle = handle.raw(), period, "start data refresh timer");
        self.timer = Some(handle);
        self.interval = Some(period);
        handle
    }

    /// Clears the interval. Stopping a stopped timer is a no-op.
    pub fn stop<H: TimerHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.timer.take() {
            host.clear_interval(handle);
            self.interval = None;
            debug!(handle = handle.raw(), "stop data refresh timer");
        }
    }

    /// Handles a fired interval: runs `callback` and restarts the interval
    /// when the returned period changed. Returns `true` when the callback ran.
    pub fn on_interval<H, F>(&mut self, host: &mut H, handle: TimerHandle, callback: F) -> bool
    where
        H: TimerHost + ?Sized,
        F: FnOnce() -> f64,
    {
        if !self.owns(handle) {
            return false;
        }

        let requested = callback();
        if !requested.is_nan() && self.interval != Some(requested) {
            debug!(
                previous = self.interval,
                requested, "restart data refresh timer with new period"
            );
            self.stop(host);
            self.start(host, requested);
        }
        true
    }
}
