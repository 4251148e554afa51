use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;

use crate::core::{
    ActiveElement, AxisDimension, AxisGeometry, AxisId, DataPoint, Dataset, DatasetMeta,
    DatasetValue, PixelRect, RenderedElement, TimeUnit,
};
use crate::error::{ChartError, ChartResult};

/// Chart domain state the realtime engine windows and scrolls.
///
/// The rendering layer owns element layout: it fills `metas[i].elements`,
/// overlay elements and the tooltip, and keeps axis geometry current. The
/// engine evicts samples from `datasets` and nudges element coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamingChart {
    pub datasets: Vec<Dataset>,
    pub metas: Vec<DatasetMeta>,
    /// Shared category labels (epoch ms) for scalar series.
    pub labels: Vec<f64>,
    pub active: Vec<ActiveElement>,
    pub tooltip: Option<RenderedElement>,
    pub overlays: Vec<RenderedElement>,
    pub axes: IndexMap<AxisId, AxisGeometry>,
    pub chart_area: PixelRect,
    pub canvas: PixelRect,
}

impl StreamingChart {
    #[must_use]
    pub fn new(canvas: PixelRect, chart_area: PixelRect) -> Self {
        Self {
            canvas,
            chart_area,
            ..Self::default()
        }
    }

    /// Adds a dataset plotted against `meta`'s axes and returns its index.
    pub fn add_dataset(&mut self, dataset: Dataset, meta: DatasetMeta) -> usize {
        self.datasets.push(dataset);
        self.metas.push(meta);
        self.datasets.len() - 1
    }

    #[must_use]
    pub fn dataset(&self, index: usize) -> Option<&Dataset> {
        self.datasets.get(index)
    }

    #[must_use]
    pub fn dataset_mut(&mut self, index: usize) -> Option<&mut Dataset> {
        self.datasets.get_mut(index)
    }

    #[must_use]
    pub fn meta(&self, index: usize) -> Option<&DatasetMeta> {
        self.metas.get(index)
    }

    #[must_use]
    pub fn meta_mut(&mut self, index: usize) -> Option<&mut DatasetMeta> {
        self.metas.get_mut(index)
    }

    /// Appends a sample at the live end of a dataset.
    pub fn push_value(&mut self, dataset_index: usize, value: DatasetValue) -> ChartResult<()> {
        let dataset = self.datasets.get_mut(dataset_index).ok_or_else(|| {
            ChartError::InvalidData(format!("dataset index {dataset_index} is out of range"))
        })?;
        dataset.push(value);
        Ok(())
    }

    /// Appends an exact decimal sample stamped with a UTC time.
    pub fn push_decimal_sample(
        &mut self,
        dataset_index: usize,
        time: DateTime<Utc>,
        value: Decimal,
    ) -> ChartResult<()> {
        let point = DataPoint::from_decimal_time(time, value)?;
        self.push_value(dataset_index, DatasetValue::Record(point))
    }

    pub fn set_axis_geometry(&mut self, axis_id: impl Into<AxisId>, geometry: AxisGeometry) {
        self.axes.insert(axis_id.into(), geometry);
    }

    #[must_use]
    pub fn axis_geometry(&self, axis_id: &AxisId) -> Option<AxisGeometry> {
        self.axes.get(axis_id).copied()
    }

    /// Sorted, deduplicated values of every sample plotted against `axis_id`.
    ///
    /// With `round`, values are floored to the start of that unit first.
    #[must_use]
    pub fn data_timestamps(&self, axis_id: &AxisId, round: Option<TimeUnit>) -> Vec<f64> {
        let mut timestamps: Vec<OrderedFloat<f64>> = Vec::new();
        for (dataset, meta) in self.datasets.iter().zip(&self.metas) {
            let Some(dimension) = meta.bound_dimension(axis_id) else {
                continue;
            };
            timestamps.extend(
                (0..dataset.len())
                    .filter_map(|index| dataset.parsed_value(index, &self.labels, dimension))
                    .filter(|value| value.is_finite())
                    .map(|value| OrderedFloat(round.map_or(value, |unit| unit.start_of(value)))),
            );
        }
        timestamps.sort_unstable();
        timestamps.dedup();
        timestamps.into_iter().map(|value| value.0).collect()
    }

    /// Whether any dataset is plotted against `axis_id` on `dimension`.
    #[must_use]
    pub fn has_dataset_on(&self, axis_id: &AxisId, dimension: AxisDimension) -> bool {
        self.metas
            .iter()
            .any(|meta| meta.bound_dimension(axis_id) == Some(dimension))
    }
}

#[cfg(test)]
mod tests {
    use super::StreamingChart;
    use crate::core::{AxisId, DataPoint, Dataset, DatasetMeta, PixelRect, TimeUnit};

    fn chart() -> StreamingChart {
        let mut chart = StreamingChart::new(
            PixelRect::new(0.0, 0.0, 800.0, 400.0),
            PixelRect::new(40.0, 10.0, 780.0, 370.0),
        );
        chart.add_dataset(
            Dataset::new("a").with_points([
                DataPoint::new(2_500.0, 1.0),
                DataPoint::new(1_000.0, 2.0),
            ]),
            DatasetMeta::new("x", "y"),
        );
        chart.add_dataset(
            Dataset::new("b").with_points([DataPoint::new(1_000.0, 3.0)]),
            DatasetMeta::new("x", "y"),
        );
        chart
    }

    #[test]
    fn data_timestamps_are_sorted_and_unique() {
        let chart = chart();
        assert_eq!(chart.data_timestamps(&AxisId::from("x"), None), vec![1_000.0, 2_500.0]);
    }

    #[test]
    fn data_timestamps_can_be_rounded() {
        let chart = chart();
        assert_eq!(
            chart.data_timestamps(&AxisId::from("x"), Some(TimeUnit::Second)),
            vec![1_000.0, 2_000.0]
        );
    }

    #[test]
    fn push_value_rejects_unknown_dataset() {
        let mut chart = chart();
        assert!(chart.push_value(9, crate::core::DatasetValue::Scalar(1.0)).is_err());
    }
}
