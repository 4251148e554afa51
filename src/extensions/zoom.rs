use serde::{Deserialize, Serialize};

use crate::core::AxisGeometry;

/// Shortest window a zoom gesture may produce, in milliseconds.
pub const MIN_ZOOM_DURATION_MS: f64 = 1.0;

/// Caller-supplied clamps for zooming and panning one realtime axis.
///
/// Unset bounds are open, except that durations never drop below
/// [`MIN_ZOOM_DURATION_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub min_delay: Option<f64>,
    pub max_delay: Option<f64>,
}

impl ZoomLimits {
    #[must_use]
    pub fn with_duration_range(mut self, min: f64, max: f64) -> Self {
        self.min_duration = Some(min);
        self.max_duration = Some(max);
        self
    }

    #[must_use]
    pub fn with_delay_range(mut self, min: f64, max: f64) -> Self {
        self.min_delay = Some(min);
        self.max_delay = Some(max);
        self
    }

    #[must_use]
    pub fn clamp_duration(self, duration: f64) -> f64 {
        let lower = self.min_duration.unwrap_or(0.0).max(MIN_ZOOM_DURATION_MS);
        let upper = self.max_duration.unwrap_or(f64::INFINITY);
        clamp(duration, lower, upper)
    }

    #[must_use]
    pub fn clamp_delay(self, delay: f64) -> f64 {
        clamp(
            delay,
            self.min_delay.unwrap_or(f64::NEG_INFINITY),
            self.max_delay.unwrap_or(f64::INFINITY),
        )
    }
}

// Upper bound wins when the bounds cross.
fn clamp(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

/// Duration and delay of a realtime window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub duration: f64,
    pub delay: f64,
}

impl WindowSpan {
    #[must_use]
    pub fn new(duration: f64, delay: f64) -> Self {
        Self { duration, delay }
    }
}

/// Fraction of the axis between `center` and the axis' max edge.
#[must_use]
pub fn zoom_max_percent(geometry: AxisGeometry, center_x: f64, center_y: f64) -> f64 {
    let rect = geometry.rect;
    let (edge, start, position) = if geometry.is_horizontal() {
        (rect.right, rect.left, center_x)
    } else {
        (rect.bottom, rect.top, center_y)
    };
    let length = edge - start;
    if length == 0.0 {
        return 0.0;
    }
    (edge - position) / length
}

/// Zooms a window by `factor` (`> 1` zooms in) around a point `max_percent`
/// of the way from the max edge, keeping that point fixed in time.
#[must_use]
pub fn zoom_span(span: WindowSpan, factor: f64, max_percent: f64, limits: ZoomLimits) -> WindowSpan {
    let duration = limits.clamp_duration(span.duration * (2.0 - factor));
    let delay = span.delay + max_percent * (span.duration - duration);
    WindowSpan {
        duration,
        delay: limits.clamp_delay(delay),
    }
}

/// Delay after dragging the window by `value_delta` milliseconds.
#[must_use]
pub fn pan_delay(delay: f64, value_delta: f64, limits: ZoomLimits) -> f64 {
    let delta = if value_delta.is_finite() { value_delta } else { 0.0 };
    limits.clamp_delay(delay + delta)
}
