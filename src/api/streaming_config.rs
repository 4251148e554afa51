use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{AxisId, TimeUnit};

pub const DEFAULT_DURATION_MS: f64 = 10_000.0;
pub const DEFAULT_DELAY_MS: f64 = 0.0;
pub const DEFAULT_REFRESH_MS: f64 = 1_000.0;
pub const DEFAULT_FRAME_RATE: f64 = 30.0;
pub const DEFAULT_ANCHOR_COUNT: usize = 2;

fn default_duration() -> f64 {
    DEFAULT_DURATION_MS
}

fn default_refresh() -> f64 {
    DEFAULT_REFRESH_MS
}

fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

fn default_anchor_count() -> usize {
    DEFAULT_ANCHOR_COUNT
}

fn default_true() -> bool {
    true
}

/// Chart-wide streaming options. Every field may be overridden per axis
/// through [`RealtimeOverrides`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamingOptions {
    /// Window length in milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Lag of the window's right edge behind real time, in milliseconds.
    #[serde(default)]
    pub delay: f64,
    /// Explicit eviction age; `None` expires samples after `duration + delay`.
    #[serde(default)]
    pub ttl: Option<f64>,
    /// Data-refresh period in milliseconds.
    #[serde(default = "default_refresh")]
    pub refresh: f64,
    /// Target frames per second of the scroll timer.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    #[serde(default)]
    pub pause: bool,
    /// Expired samples kept as curve anchors at the window edge.
    #[serde(default = "default_anchor_count")]
    pub anchor_count: usize,
}

impl Default for StreamingOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION_MS,
            delay: DEFAULT_DELAY_MS,
            ttl: None,
            refresh: DEFAULT_REFRESH_MS,
            frame_rate: DEFAULT_FRAME_RATE,
            pause: false,
            anchor_count: DEFAULT_ANCHOR_COUNT,
        }
    }
}

impl StreamingOptions {
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Option<f64>) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_refresh(mut self, refresh: f64) -> Self {
        self.refresh = refresh;
        self
    }

    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    #[must_use]
    pub fn with_pause(mut self, pause: bool) -> Self {
        self.pause = pause;
        self
    }

    #[must_use]
    pub fn with_anchor_count(mut self, anchor_count: usize) -> Self {
        self.anchor_count = anchor_count;
        self
    }
}

/// Per-axis overrides; `None` inherits the chart-wide value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeOverrides {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub ttl: Option<f64>,
    pub refresh: Option<f64>,
    pub frame_rate: Option<f64>,
    pub pause: Option<bool>,
    pub anchor_count: Option<usize>,
}

impl RealtimeOverrides {
    /// Resolves effective options: the axis value when set, else the chart default.
    #[must_use]
    pub fn resolve(&self, defaults: &StreamingOptions) -> StreamingOptions {
        StreamingOptions {
            duration: self.duration.unwrap_or(defaults.duration),
            delay: self.delay.unwrap_or(defaults.delay),
            ttl: self.ttl.or(defaults.ttl),
            refresh: self.refresh.unwrap_or(defaults.refresh),
            frame_rate: self.frame_rate.unwrap_or(defaults.frame_rate),
            pause: self.pause.unwrap_or(defaults.pause),
            anchor_count: self.anchor_count.unwrap_or(defaults.anchor_count),
        }
    }
}

/// Where ticks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickSource {
    /// Nominal calendar-aligned times.
    #[default]
    Auto,
    /// Nominal times snapped forward to existing data timestamps.
    Data,
}

/// Time-axis tick options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeAxisOptions {
    /// Fixed minor unit; `None` selects one from the label capacity.
    #[serde(default)]
    pub unit: Option<TimeUnit>,
    /// Fixed step in minor units; `None` picks one from the unit's step table.
    #[serde(default)]
    pub step_size: Option<u32>,
    /// Rounds data timestamps down to this unit and disables major alignment.
    #[serde(default)]
    pub round: Option<TimeUnit>,
    /// First day of week (1 = Monday ... 7 = Sunday) for week ticks.
    /// In JSON, `true` means Monday and `false` the Sunday default.
    #[serde(default, deserialize_with = "deserialize_iso_weekday")]
    pub iso_weekday: Option<u8>,
    /// Finest unit automatic selection may pick.
    #[serde(default = "default_min_unit")]
    pub min_unit: TimeUnit,
    #[serde(default)]
    pub source: TickSource,
    /// Aligns the first tick on the major unit.
    #[serde(default = "default_true")]
    pub major_enabled: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IsoWeekdaySetting {
    Flag(bool),
    Day(u8),
}

fn deserialize_iso_weekday<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let setting = Option::<IsoWeekdaySetting>::deserialize(deserializer)?;
    Ok(match setting {
        Some(IsoWeekdaySetting::Flag(true)) => Some(1),
        Some(IsoWeekdaySetting::Flag(false)) | None => None,
        Some(IsoWeekdaySetting::Day(day)) => Some(day),
    })
}

fn default_min_unit() -> TimeUnit {
    TimeUnit::Millisecond
}

impl Default for TimeAxisOptions {
    fn default() -> Self {
        Self {
            unit: None,
            step_size: None,
            round: None,
            iso_weekday: None,
            min_unit: TimeUnit::Millisecond,
            source: TickSource::Auto,
            major_enabled: true,
        }
    }
}

/// Options of a single realtime axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RealtimeAxisOptions {
    #[serde(default)]
    pub realtime: RealtimeOverrides,
    #[serde(default)]
    pub time: TimeAxisOptions,
}

impl RealtimeAxisOptions {
    #[must_use]
    pub fn with_realtime(mut self, realtime: RealtimeOverrides) -> Self {
        self.realtime = realtime;
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: TimeAxisOptions) -> Self {
        self.time = time;
        self
    }
}

/// Serializable bundle of chart-wide and per-axis options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamingConfig {
    #[serde(default)]
    pub streaming: StreamingOptions,
    #[serde(default)]
    pub axes: IndexMap<AxisId, RealtimeAxisOptions>,
}
