use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::axis::AxisId;
use crate::core::element::{AxisBindings, RenderedElement};
use crate::core::types::{AxisDimension, DataPoint};

/// Raw sample as held by a dataset.
///
/// `Scalar` values take their time from the chart's shared category labels,
/// mirroring category-style series. `Missing` stands for a hole or a sample the
/// caller could not parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DatasetValue {
    Record(DataPoint),
    Scalar(f64),
    Missing,
}

/// Entry of a per-point styling array (colors, radii, flags...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<DatasetValue>,
    /// Per-point styling arrays keyed by option name (`point_radius`, ...).
    pub styles: IndexMap<String, Vec<StyleValue>>,
    /// Per-point data-label option arrays keyed by option name.
    pub data_labels: IndexMap<String, Vec<StyleValue>>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = DataPoint>) -> Self {
        self.data = points.into_iter().map(DatasetValue::Record).collect();
        self
    }

    #[must_use]
    pub fn with_scalars(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.data = values.into_iter().map(DatasetValue::Scalar).collect();
        self
    }

    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, values: Vec<StyleValue>) -> Self {
        self.styles.insert(key.into(), values);
        self
    }

    #[must_use]
    pub fn with_data_label(mut self, key: impl Into<String>, values: Vec<StyleValue>) -> Self {
        self.data_labels.insert(key.into(), values);
        self
    }

    pub fn push(&mut self, value: DatasetValue) {
        self.data.push(value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Series made of plain scalars share the chart's category labels.
    /// An empty series has no shape yet and is not one.
    #[must_use]
    pub fn is_scalar_series(&self) -> bool {
        matches!(self.data.first(), Some(DatasetValue::Scalar(_)))
    }

    /// Parsed sample at `index`, or `None` when it is missing or unparseable.
    #[must_use]
    pub fn parsed(&self, index: usize, labels: &[f64]) -> Option<DataPoint> {
        match self.data.get(index)? {
            DatasetValue::Record(point) => Some(*point),
            DatasetValue::Scalar(value) => labels
                .get(index)
                .map(|time| DataPoint::new(*time, *value)),
            DatasetValue::Missing => None,
        }
    }

    #[must_use]
    pub fn parsed_value(
        &self,
        index: usize,
        labels: &[f64],
        dimension: AxisDimension,
    ) -> Option<f64> {
        self.parsed(index, labels)
            .map(|point| point.value(dimension))
    }

    /// Removes `count` samples at `start` together with every parallel styling
    /// and data-label entry. Arrays shorter than the range lose what they have.
    pub fn remove_range(&mut self, start: usize, count: usize) {
        splice_out(&mut self.data, start, count);
        for values in self.styles.values_mut() {
            splice_out(values, start, count);
        }
        for values in self.data_labels.values_mut() {
            splice_out(values, start, count);
        }
    }
}

pub(crate) fn splice_out<T>(values: &mut Vec<T>, start: usize, count: usize) {
    if count == 0 || start >= values.len() {
        return;
    }
    let end = start.saturating_add(count).min(values.len());
    values.drain(start..end);
}

/// Rendering-layer metadata for one dataset: the axes it is plotted against
/// and the elements last laid out for it.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetMeta {
    pub x_axis_id: AxisId,
    pub y_axis_id: AxisId,
    pub elements: Vec<RenderedElement>,
    pub dataset_element: Option<RenderedElement>,
}

impl DatasetMeta {
    #[must_use]
    pub fn new(x_axis_id: impl Into<AxisId>, y_axis_id: impl Into<AxisId>) -> Self {
        Self {
            x_axis_id: x_axis_id.into(),
            y_axis_id: y_axis_id.into(),
            elements: Vec::new(),
            dataset_element: None,
        }
    }

    /// Dimension of the plotted data controlled by `axis_id`, if any.
    #[must_use]
    pub fn bound_dimension(&self, axis_id: &AxisId) -> Option<AxisDimension> {
        if &self.x_axis_id == axis_id {
            Some(AxisDimension::X)
        } else if &self.y_axis_id == axis_id {
            Some(AxisDimension::Y)
        } else {
            None
        }
    }

    /// Rebuilds the axis bindings of every element from the current axis ids.
    pub fn rebuild_bindings(&mut self) {
        let bindings = AxisBindings::for_dataset(&self.x_axis_id, &self.y_axis_id);
        for element in &mut self.elements {
            element.bindings = bindings.clone();
        }
        if let Some(element) = self.dataset_element.as_mut() {
            element.bindings = bindings;
        }
    }
}

/// Reference to a highlighted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveElement {
    pub dataset_index: usize,
    pub index: usize,
}

impl ActiveElement {
    #[must_use]
    pub fn new(dataset_index: usize, index: usize) -> Self {
        Self {
            dataset_index,
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetMeta, DatasetValue, StyleValue};
    use crate::core::{AxisDimension, AxisId, DataPoint};

    #[test]
    fn scalar_samples_take_time_from_labels() {
        let dataset = Dataset::new("s").with_scalars([5.0, 6.0]);
        let labels = [1_000.0];
        assert_eq!(dataset.parsed(0, &labels), Some(DataPoint::new(1_000.0, 5.0)));
        assert_eq!(dataset.parsed(1, &labels), None);
        assert!(dataset.is_scalar_series());
        assert!(!Dataset::new("empty").is_scalar_series());
    }

    #[test]
    fn remove_range_trims_parallel_arrays() {
        let mut dataset = Dataset::new("s")
            .with_points((0..4).map(|i| DataPoint::new(f64::from(i), 0.0)))
            .with_style(
                "point_radius",
                (0..4).map(|i| StyleValue::Number(f64::from(i))).collect(),
            )
            .with_data_label("color", vec![StyleValue::Flag(true)]);
        dataset.remove_range(0, 2);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.styles["point_radius"], vec![
            StyleValue::Number(2.0),
            StyleValue::Number(3.0)
        ]);
        assert!(dataset.data_labels["color"].is_empty());
        assert!(matches!(dataset.data[0], DatasetValue::Record(p) if p.x == 2.0));
    }

    #[test]
    fn bound_dimension_follows_axis_ids() {
        let meta = DatasetMeta::new("time", "value");
        assert_eq!(meta.bound_dimension(&AxisId::from("time")), Some(AxisDimension::X));
        assert_eq!(meta.bound_dimension(&AxisId::from("value")), Some(AxisDimension::Y));
        assert_eq!(meta.bound_dimension(&AxisId::from("other")), None);
    }
}
