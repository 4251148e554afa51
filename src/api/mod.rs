mod chart_model;
mod clock;
mod engine;
mod engine_dispatch;
mod json_contract;
mod manual_timer_host;
mod plugin_dispatch;
mod plugin_registry;
mod realtime_axis;
mod realtime_zoom;
mod retention_policy;
mod scheduler;
mod streaming_config;
mod tick_generator;
mod validation;
mod window_scroller;

pub use chart_model::StreamingChart;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{RefreshCallback, StreamingEngine};
pub use json_contract::{STREAMING_CONFIG_JSON_SCHEMA_V1, StreamingConfigJsonContractV1};
pub use manual_timer_host::{ManualTimerHost, TimerEvent};
pub use realtime_axis::{AxisState, RealTimeAxis};
pub use retention_policy::{DatasetEviction, RetentionReport, evict_expired};
pub use scheduler::{DataRefreshTimer, FrameRefreshTimer, TimerHandle, TimerHost, frame_duration_ms};
pub use streaming_config::{
    DEFAULT_ANCHOR_COUNT, DEFAULT_DELAY_MS, DEFAULT_DURATION_MS, DEFAULT_FRAME_RATE,
    DEFAULT_REFRESH_MS, RealtimeAxisOptions, RealtimeOverrides, StreamingConfig,
    StreamingOptions, TickSource, TimeAxisOptions,
};
pub use tick_generator::{
    MAX_UNITS_PER_STEP, Tick, TickRequest, TickSet, determine_major_unit,
    determine_step_size, determine_unit_for_auto_ticks, generate_ticks, label_capacity,
};
pub use window_scroller::{ScrollOutcome, scroll_offset, scroll_window, transition_element};
