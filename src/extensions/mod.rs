//! Optional collaborators of the realtime core: plugin hooks, annotation
//! bindings and zoom/pan math.

pub mod annotations;
pub mod plugins;
pub mod zoom;

pub use annotations::{
    AnnotationScale, BoxAnnotation, ClipArea, LineAnnotation, PointAnnotation, ScaleValue,
    box_annotation_bindings, line_annotation_bindings, point_annotation_bindings,
};
pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
pub use zoom::{
    MIN_ZOOM_DURATION_MS, WindowSpan, ZoomLimits, pan_delay, zoom_max_percent, zoom_span,
};
