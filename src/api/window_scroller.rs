use tracing::trace;

use crate::core::{AxisGeometry, AxisId, RenderedElement, TimeWindow};

use super::StreamingChart;

/// Pixel distance the window moved between two frames.
///
/// Positive offsets shift bound coordinates toward smaller pixels. The sign is
/// flipped when `is_horizontal == reverse`, so horizontal axes scroll left and
/// vertical axes (which grow upward) scroll down.
#[must_use]
pub fn scroll_offset(geometry: AxisGeometry, elapsed: f64, duration: f64) -> f64 {
    if !(duration > 0.0) || !elapsed.is_finite() {
        return 0.0;
    }
    let offset = geometry.length() * elapsed / duration;
    if geometry.is_horizontal() == geometry.reverse {
        -offset
    } else {
        offset
    }
}

/// Shifts every property of `element` bound to `axis_id` by `offset` pixels.
///
/// Non-finite property values are left untouched; in-flight animations of a
/// bound property are shifted whether or not the value itself was. Returns
/// the number of bindings applied.
pub fn transition_element(element: &mut RenderedElement, axis_id: &AxisId, offset: f64) -> usize {
    let RenderedElement {
        properties,
        animations,
        bindings,
        ..
    } = element;

    let mut applied = 0;
    for binding in bindings.for_axis(axis_id) {
        let delta = if binding.reverse { -offset } else { offset };
        if let Some(value) = properties.get_mut(&binding.property) {
            if value.is_finite() {
                *value -= delta;
            }
        }
        if let Some(animation) = animations.get_mut(&binding.property) {
            animation.shift(delta);
        }
        applied += 1;
    }
    applied
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOutcome {
    pub offset: f64,
    pub min: f64,
    pub max: f64,
    /// Bound properties shifted across all elements.
    pub shifted: usize,
}

/// Scrolls everything bound to `axis_id` by the time elapsed since the
/// window's head, then advances the window to `now`.
///
/// Covers dataset point elements, dataset connector elements (whose cached
/// paths are dropped), overlays and the tooltip.
pub fn scroll_window(
    chart: &mut StreamingChart,
    axis_id: &AxisId,
    geometry: AxisGeometry,
    window: &mut TimeWindow,
    now: f64,
) -> ScrollOutcome {
    let elapsed = (now - window.head()).max(0.0);
    let offset = scroll_offset(geometry, elapsed, window.duration());
    let mut shifted = 0;

    if offset != 0.0 {
        for meta in &mut chart.metas {
            for element in &mut meta.elements {
                shifted += transition_element(element, axis_id, offset);
            }
            if let Some(element) = meta.dataset_element.as_mut() {
                shifted += transition_element(element, axis_id, offset);
                element.invalidate_path();
            }
        }
        for overlay in &mut chart.overlays {
            shifted += transition_element(overlay, axis_id, offset);
        }
        if let Some(tooltip) = chart.tooltip.as_mut() {
            shifted += transition_element(tooltip, axis_id, offset);
        }
    }

    window.advance_to(now);
    let (min, max) = window.bounds();
    trace!(axis = %axis_id, offset, min, max, shifted, "scrolled realtime window");

    ScrollOutcome {
        offset,
        min,
        max,
        shifted,
    }
}
