use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::dataset::splice_out;
use crate::core::{AxisDimension, AxisId, Dataset};

use super::{StreamingChart, StreamingOptions};

/// Samples removed from one dataset by a retention sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEviction {
    pub dataset_index: usize,
    pub start: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionReport {
    pub evictions: Vec<DatasetEviction>,
}

impl RetentionReport {
    #[must_use]
    pub fn total_evicted(&self) -> usize {
        self.evictions.iter().map(|eviction| eviction.count).sum()
    }

    #[must_use]
    pub fn evicted_from(&self, dataset_index: usize) -> usize {
        self.evictions
            .iter()
            .filter(|eviction| eviction.dataset_index == dataset_index)
            .map(|eviction| eviction.count)
            .sum()
    }
}

/// Removes expired samples from every dataset plotted against `axis_id`.
///
/// `options` are the axis' resolved options and `window_max` its current right
/// edge. Each bound dataset loses a contiguous run of samples whose bound
/// value is `<= now - effective_ttl`; parallel styling arrays, data labels,
/// shared category labels (for scalar series) and active element references
/// are kept consistent. A missing or unparseable sample stops the scan.
pub fn evict_expired(
    chart: &mut StreamingChart,
    axis_id: &AxisId,
    options: &StreamingOptions,
    window_max: f64,
    now: f64,
) -> RetentionReport {
    let cutoff = now - options.ttl.unwrap_or(options.duration + options.delay);
    let mut report = RetentionReport::default();
    let mut label_removal = None;

    for (dataset_index, (dataset, meta)) in chart
        .datasets
        .iter_mut()
        .zip(&chart.metas)
        .enumerate()
    {
        let Some(dimension) = meta.bound_dimension(axis_id) else {
            continue;
        };

        let start = if options.pause {
            first_visible_index(dataset, &chart.labels, dimension, window_max)
                .saturating_add(options.anchor_count)
                .min(dataset.len())
        } else {
            0
        };

        let mut count =
            expired_run_length(dataset, &chart.labels, dimension, start, cutoff);
        if options.ttl.is_none() {
            count = count.saturating_sub(options.anchor_count);
        }

        let scalar_series = dataset.is_scalar_series();
        dataset.remove_range(start, count);
        if scalar_series && count > 0 {
            label_removal = Some((start, count));
        }

        chart.active.retain_mut(|item| {
            if item.dataset_index != dataset_index || item.index < start {
                return true;
            }
            if item.index >= start + count {
                item.index -= count;
                true
            } else {
                false
            }
        });

        if count > 0 {
            debug!(
                axis = %axis_id,
                dataset_index,
                start,
                count,
                cutoff,
                "evicted expired samples"
            );
            report.evictions.push(DatasetEviction {
                dataset_index,
                start,
                count,
            });
        } else {
            trace!(axis = %axis_id, dataset_index, cutoff, "no expired samples");
        }
    }

    if let Some((start, count)) = label_removal {
        splice_out(&mut chart.labels, start, count);
    }

    report
}

// Missing samples are skipped; the scan ends at the first value not before `max`.
fn first_visible_index(
    dataset: &Dataset,
    labels: &[f64],
    dimension: AxisDimension,
    max: f64,
) -> usize {
    let len = dataset.len();
    let mut index = 0;
    while index < len {
        if let Some(value) = dataset.parsed_value(index, labels, dimension) {
            if !(value < max) {
                break;
            }
        }
        index += 1;
    }
    index
}

fn expired_run_length(
    dataset: &Dataset,
    labels: &[f64],
    dimension: AxisDimension,
    start: usize,
    cutoff: f64,
) -> usize {
    (start..dataset.len())
        .take_while(|index| {
            dataset
                .parsed_value(*index, labels, dimension)
                .is_some_and(|value| value <= cutoff)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::{expired_run_length, first_visible_index};
    use crate::core::{AxisDimension, DataPoint, Dataset, DatasetValue};

    #[test]
    fn expired_run_stops_at_missing_sample() {
        let mut dataset = Dataset::new("s").with_points([DataPoint::new(0.0, 0.0)]);
        dataset.push(DatasetValue::Missing);
        dataset.push(DatasetValue::Record(DataPoint::new(10.0, 0.0)));

        assert_eq!(expired_run_length(&dataset, &[], AxisDimension::X, 0, 100.0), 1);
    }

    #[test]
    fn expired_run_stops_at_nan_value() {
        let dataset = Dataset::new("s").with_points([
            DataPoint::new(0.0, 0.0),
            DataPoint::new(f64::NAN, 0.0),
            DataPoint::new(1.0, 0.0),
        ]);
        assert_eq!(expired_run_length(&dataset, &[], AxisDimension::X, 0, 100.0), 1);
    }

    #[test]
    fn first_visible_index_skips_missing_samples() {
        let mut dataset = Dataset::new("s").with_points([DataPoint::new(0.0, 0.0)]);
        dataset.push(DatasetValue::Missing);
        dataset.push(DatasetValue::Record(DataPoint::new(50.0, 0.0)));

        assert_eq!(first_visible_index(&dataset, &[], AxisDimension::X, 40.0), 2);
        assert_eq!(first_visible_index(&dataset, &[], AxisDimension::X, 100.0), 3);
    }
}
