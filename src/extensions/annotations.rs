//! Axis bindings for annotation overlays.
//!
//! Annotations drawn at data values on a realtime axis must scroll with it.
//! These builders decide which edges of a box, line or point annotation are
//! anchored to data (and therefore move) and which are pinned to the chart
//! area. Install the result on the overlay's [`RenderedElement`] bindings.
//!
//! [`RenderedElement`]: crate::core::RenderedElement

use serde::{Deserialize, Serialize};

use crate::core::{AxisBindings, AxisGeometry, AxisId, ElementProperty, PixelRect};

/// An axis an annotation is positioned against, with its current bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationScale {
    pub id: AxisId,
    pub geometry: AxisGeometry,
    pub min: f64,
    pub max: f64,
}

impl AnnotationScale {
    #[must_use]
    pub fn new(id: impl Into<AxisId>, geometry: AxisGeometry, min: f64, max: f64) -> Self {
        Self {
            id: id.into(),
            geometry,
            min,
            max,
        }
    }

    /// Pixel of `value`, or `fallback` when the value cannot follow the axis.
    #[must_use]
    pub fn scale_value(&self, value: Option<f64>, fallback: f64) -> ScaleValue {
        match value.filter(|value| value.is_finite()) {
            Some(value) => ScaleValue {
                pixel: self.geometry.pixel_for_value(value, self.min, self.max),
                transitionable: true,
            },
            None => ScaleValue {
                pixel: fallback,
                transitionable: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleValue {
    pub pixel: f64,
    /// Whether the pixel tracks a data value and so moves when the axis scrolls.
    pub transitionable: bool,
}

/// Rectangle spanning `[x_min, x_max] x [y_min, y_max]`; a missing value
/// extends the box to the chart-area edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxAnnotation {
    pub x_scale: Option<AnnotationScale>,
    pub y_scale: Option<AnnotationScale>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

/// Line annotation: either a full-span line at one value of a single axis, or
/// a segment between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineAnnotation {
    Value {
        scale: AnnotationScale,
        value: Option<f64>,
    },
    Segment {
        x_scale: Option<AnnotationScale>,
        y_scale: Option<AnnotationScale>,
        x_min: Option<f64>,
        x_max: Option<f64>,
        y_min: Option<f64>,
        y_max: Option<f64>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointAnnotation {
    pub x_scale: Option<AnnotationScale>,
    pub y_scale: Option<AnnotationScale>,
    pub x_value: Option<f64>,
    pub y_value: Option<f64>,
}

/// Chart-area edges a line annotation is clipped to while laid out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipArea {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

#[must_use]
pub fn box_annotation_bindings(annotation: &BoxAnnotation, chart_area: PixelRect) -> AxisBindings {
    let mut bindings = AxisBindings::new();

    if let Some(scale) = &annotation.x_scale {
        bind_box_edges(
            &mut bindings,
            scale,
            scale.scale_value(annotation.x_min, chart_area.left),
            scale.scale_value(annotation.x_max, chart_area.right),
            [ElementProperty::X, ElementProperty::X2, ElementProperty::Width],
        );
    }
    if let Some(scale) = &annotation.y_scale {
        bind_box_edges(
            &mut bindings,
            scale,
            scale.scale_value(annotation.y_min, chart_area.top),
            scale.scale_value(annotation.y_max, chart_area.bottom),
            [ElementProperty::Y, ElementProperty::Y2, ElementProperty::Height],
        );
    }
    bindings
}

// `properties` is `[start edge, end edge, size]`.
fn bind_box_edges(
    bindings: &mut AxisBindings,
    scale: &AnnotationScale,
    min: ScaleValue,
    max: ScaleValue,
    properties: [ElementProperty; 3],
) {
    let [start, end, size] = properties;
    let swapped = min.pixel > max.pixel;

    if min.transitionable {
        bindings.bind(if swapped { end } else { start }, scale.id.clone());
    }
    if max.transitionable {
        bindings.bind(if swapped { start } else { end }, scale.id.clone());
    }
    if min.transitionable != max.transitionable {
        bindings.bind_reversed(size, scale.id.clone(), min.transitionable);
    }
}

#[must_use]
pub fn line_annotation_bindings(
    annotation: &LineAnnotation,
    chart_area: PixelRect,
) -> (AxisBindings, ClipArea) {
    let mut bindings = AxisBindings::new();

    match annotation {
        LineAnnotation::Value { scale, value } => {
            let horizontal = scale.geometry.is_horizontal();
            if scale.scale_value(*value, 0.0).transitionable {
                let (first, second) = if horizontal {
                    (ElementProperty::X, ElementProperty::X2)
                } else {
                    (ElementProperty::Y, ElementProperty::Y2)
                };
                bindings.bind(first, scale.id.clone());
                bindings.bind(second, scale.id.clone());
            }
            let clip = if horizontal {
                ClipArea {
                    top: Some(chart_area.top),
                    bottom: Some(chart_area.bottom),
                    ..ClipArea::default()
                }
            } else {
                ClipArea {
                    left: Some(chart_area.left),
                    right: Some(chart_area.right),
                    ..ClipArea::default()
                }
            };
            (bindings, clip)
        }
        LineAnnotation::Segment {
            x_scale,
            y_scale,
            x_min,
            x_max,
            y_min,
            y_max,
        } => {
            let mut clip = ClipArea::default();
            if let Some(scale) = x_scale {
                if scale.scale_value(*x_min, chart_area.left).transitionable {
                    bindings.bind(ElementProperty::X, scale.id.clone());
                } else {
                    clip.left = Some(chart_area.left);
                }
                if scale.scale_value(*x_max, chart_area.right).transitionable {
                    bindings.bind(ElementProperty::X2, scale.id.clone());
                } else {
                    clip.right = Some(chart_area.right);
                }
            }
            if let Some(scale) = y_scale {
                if scale.scale_value(*y_min, chart_area.top).transitionable {
                    bindings.bind(ElementProperty::Y, scale.id.clone());
                } else {
                    clip.top = Some(chart_area.top);
                }
                if scale.scale_value(*y_max, chart_area.bottom).transitionable {
                    bindings.bind(ElementProperty::Y2, scale.id.clone());
                } else {
                    clip.bottom = Some(chart_area.bottom);
                }
            }
            (bindings, clip)
        }
    }
}

#[must_use]
pub fn point_annotation_bindings(annotation: &PointAnnotation) -> AxisBindings {
    let mut bindings = AxisBindings::new();
    if let Some(scale) = &annotation.x_scale {
        if scale.scale_value(annotation.x_value, 0.0).transitionable {
            bindings.bind(ElementProperty::X, scale.id.clone());
        }
    }
    if let Some(scale) = &annotation.y_scale {
        if scale.scale_value(annotation.y_value, 0.0).transitionable {
            bindings.bind(ElementProperty::Y, scale.id.clone());
        }
    }
    bindings
}
