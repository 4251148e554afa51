//! chart-realtime: sliding-window time axes for streaming charts.
//!
//! The crate windows an unbounded stream of time-series samples: it evicts
//! samples older than the window, generates ticks for an axis whose bounds
//! move every frame and scrolls already laid-out geometry between layouts.
//! Drawing is delegated to a [`render::ChartRenderer`] and timers to a
//! [`api::TimerHost`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{StreamingConfig, StreamingEngine, StreamingOptions};
pub use error::{ChartError, ChartResult};
