use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::axis::AxisId;

/// Positional property of a rendered element that may follow an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementProperty {
    X,
    Y,
    Cp1X,
    Cp1Y,
    Cp2X,
    Cp2Y,
    X2,
    Y2,
    Width,
    Height,
}

/// Point and connector properties that move with the x axis.
pub const X_TRANSITION_PROPERTIES: [ElementProperty; 3] =
    [ElementProperty::X, ElementProperty::Cp1X, ElementProperty::Cp2X];

/// Point and connector properties that move with the y axis.
pub const Y_TRANSITION_PROPERTIES: [ElementProperty; 3] =
    [ElementProperty::Y, ElementProperty::Cp1Y, ElementProperty::Cp2Y];

/// Ties one element property to the axis that controls it.
///
/// `reverse` marks a property (typically a derived size) that must move
/// opposite to the axis when the window scrolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    pub property: ElementProperty,
    pub axis_id: AxisId,
    pub reverse: bool,
}

/// Per-element binding table, rebuilt whenever element geometry is recomputed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisBindings {
    entries: SmallVec<[AxisBinding; 6]>,
}

impl AxisBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the standard point/connector table: x-like properties follow
    /// `x_axis_id`, y-like properties follow `y_axis_id`.
    #[must_use]
    pub fn for_dataset(x_axis_id: &AxisId, y_axis_id: &AxisId) -> Self {
        let mut bindings = Self::new();
        for property in X_TRANSITION_PROPERTIES {
            bindings.bind(property, x_axis_id.clone());
        }
        for property in Y_TRANSITION_PROPERTIES {
            bindings.bind(property, y_axis_id.clone());
        }
        bindings
    }

    /// Binds `property` to `axis_id`, replacing any previous binding of that property.
    pub fn bind(&mut self, property: ElementProperty, axis_id: AxisId) {
        self.insert(AxisBinding {
            property,
            axis_id,
            reverse: false,
        });
    }

    pub fn bind_reversed(&mut self, property: ElementProperty, axis_id: AxisId, reverse: bool) {
        self.insert(AxisBinding {
            property,
            axis_id,
            reverse,
        });
    }

    fn insert(&mut self, binding: AxisBinding) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|entry| entry.property == binding.property)
        {
            *existing = binding;
        } else {
            self.entries.push(binding);
        }
    }

    #[must_use]
    pub fn get(&self, property: ElementProperty) -> Option<&AxisBinding> {
        self.entries.iter().find(|entry| entry.property == property)
    }

    pub fn for_axis<'a>(&'a self, axis_id: &'a AxisId) -> impl Iterator<Item = &'a AxisBinding> {
        self.entries
            .iter()
            .filter(move |entry| &entry.axis_id == axis_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxisBinding> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// In-flight interpolation of a single property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyAnimation {
    pub from: f64,
    pub to: f64,
}

impl PropertyAnimation {
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Interpolated value at `progress` in `[0, 1]`.
    #[must_use]
    pub fn value_at(self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * progress.clamp(0.0, 1.0)
    }

    pub fn shift(&mut self, delta: f64) {
        self.from -= delta;
        self.to -= delta;
    }
}

/// Geometry of one drawn element (a point, a series connector, an overlay or
/// the tooltip) as last laid out by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedElement {
    pub properties: IndexMap<ElementProperty, f64>,
    pub animations: IndexMap<ElementProperty, PropertyAnimation>,
    pub bindings: AxisBindings,
    /// Cached polyline of a connector element; dropped whenever its anchors move.
    pub path: Option<Vec<[f64; 2]>>,
}

impl RenderedElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new()
            .with_property(ElementProperty::X, x)
            .with_property(ElementProperty::Y, y)
    }

    #[must_use]
    pub fn with_property(mut self, property: ElementProperty, value: f64) -> Self {
        self.properties.insert(property, value);
        self
    }

    #[must_use]
    pub fn with_animation(mut self, property: ElementProperty, animation: PropertyAnimation) -> Self {
        self.animations.insert(property, animation);
        self
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: AxisBindings) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn property(&self, property: ElementProperty) -> Option<f64> {
        self.properties.get(&property).copied()
    }

    pub fn set_property(&mut self, property: ElementProperty, value: f64) {
        self.properties.insert(property, value);
    }

    #[must_use]
    pub fn animation(&self, property: ElementProperty) -> Option<PropertyAnimation> {
        self.animations.get(&property).copied()
    }

    pub fn invalidate_path(&mut self) {
        self.path = None;
    }
}
