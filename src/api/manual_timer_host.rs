use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{TimerHandle, TimerHost};

/// Timer event reported by a host for dispatch into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    AnimationFrame(TimerHandle),
    Interval(TimerHandle),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ManualInterval {
    period_ms: f64,
    next_due: f64,
}

/// Deterministic timer host for headless engines and tests.
///
/// Time only moves when the caller polls [`ManualTimerHost::due_events`].
/// Every pending frame request fires on the next poll; intervals fire at most
/// once per poll, first one period after the poll time they were armed at.
#[derive(Debug, Default)]
pub struct ManualTimerHost {
    next_raw: u64,
    now: f64,
    frame_requests: Vec<TimerHandle>,
    intervals: IndexMap<TimerHandle, ManualInterval>,
}

impl ManualTimerHost {
    #[must_use]
    pub fn new(now: f64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    #[must_use]
    pub fn pending_frame_requests(&self) -> &[TimerHandle] {
        &self.frame_requests
    }

    #[must_use]
    pub fn active_interval_count(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub fn interval_period(&self, handle: TimerHandle) -> Option<f64> {
        self.intervals.get(&handle).map(|interval| interval.period_ms)
    }

    /// Moves host time to `now` and drains the events due by then, intervals first.
    pub fn due_events(&mut self, now: f64) -> Vec<TimerEvent> {
        if now > self.now {
            self.now = now;
        }
        let mut events = Vec::new();
        for (handle, interval) in &mut self.intervals {
            if interval.next_due <= self.now {
                events.push(TimerEvent::Interval(*handle));
                interval.next_due += interval.period_ms;
                if interval.next_due <= self.now {
                    interval.next_due = self.now + interval.period_ms;
                }
            }
        }
        events.extend(
            self.frame_requests
                .drain(..)
                .map(TimerEvent::AnimationFrame),
        );
        events
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_raw += 1;
        TimerHandle::from_raw(self.next_raw)
    }
}

impl TimerHost for ManualTimerHost {
    fn request_animation_frame(&mut self) -> TimerHandle {
        let handle = self.next_handle();
        self.frame_requests.push(handle);
        handle
    }

    fn cancel_animation_frame(&mut self, handle: TimerHandle) {
        self.frame_requests.retain(|pending| *pending != handle);
    }

    fn set_interval(&mut self, period_ms: f64) -> TimerHandle {
        let handle = self.next_handle();
        self.intervals.insert(
            handle,
            ManualInterval {
                period_ms,
                next_due: self.now + period_ms,
            },
        );
        handle
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        self.intervals.shift_remove(&handle);
    }
}
