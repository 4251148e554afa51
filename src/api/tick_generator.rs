use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{TimeUnit, iso_weekday, start_of_week};
use crate::error::{ChartError, ChartResult};

use super::{TickSource, TimeAxisOptions};

/// Whole-unit distance between `min` and `max`, per step, past which generation fails.
pub const MAX_UNITS_PER_STEP: f64 = 100_000.0;

// Upper bound for the nominal tick loop when `refresh` stretches far past `max`.
const MAX_NOMINAL_TICKS: usize = 1_000_000;

/// Inputs of one tick generation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRequest {
    pub min: f64,
    pub max: f64,
    /// Number of labels the axis can display.
    pub capacity: usize,
    /// Lookahead past `max`, usually the data-refresh period.
    pub refresh: f64,
    pub time: TimeAxisOptions,
}

impl TickRequest {
    #[must_use]
    pub fn new(min: f64, max: f64, capacity: usize) -> Self {
        Self {
            min,
            max,
            capacity,
            refresh: 0.0,
            time: TimeAxisOptions::default(),
        }
    }

    #[must_use]
    pub fn with_refresh(mut self, refresh: f64) -> Self {
        self.refresh = refresh;
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: TimeAxisOptions) -> Self {
        self.time = time;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub major: bool,
}

/// Ascending, deduplicated ticks of one axis layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub ticks: Vec<Tick>,
    pub minor: TimeUnit,
    pub major: Option<TimeUnit>,
    pub step: u32,
}

impl TickSet {
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.ticks.iter().map(|tick| tick.value).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<Tick> {
        self.ticks.last().copied()
    }

    pub fn majors(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|tick| tick.major)
    }
}

/// Number of labels of `label_extent_px` that fit on an axis, at least one.
#[must_use]
pub fn label_capacity(axis_length_px: f64, label_extent_px: f64) -> usize {
    if !(label_extent_px.is_finite() && label_extent_px > 0.0) || !axis_length_px.is_finite() {
        return 1;
    }
    let fit = (axis_length_px / label_extent_px).floor();
    if fit >= 1.0 { fit as usize } else { 1 }
}

/// Finest common unit, starting at `min_unit`, whose largest step keeps the
/// tick count within `capacity`. Falls back to years.
#[must_use]
pub fn determine_unit_for_auto_ticks(
    min_unit: TimeUnit,
    min: f64,
    max: f64,
    capacity: usize,
) -> TimeUnit {
    let range = max - min;
    let capacity = capacity.max(1) as f64;
    let last = TimeUnit::ALL.len() - 1;

    for unit in &TimeUnit::ALL[min_unit.index().min(last)..last] {
        let interval = unit.interval();
        let factor = interval
            .steps
            .and_then(|steps| steps.last().copied())
            .map_or(f64::MAX, f64::from);
        if interval.common && (range / (factor * interval.size_ms)).ceil() <= capacity {
            return *unit;
        }
    }
    TimeUnit::Year
}

/// Smallest listed step of `unit` keeping the tick count within `capacity`.
#[must_use]
pub fn determine_step_size(min: f64, max: f64, unit: TimeUnit, capacity: usize) -> u32 {
    let range = max - min;
    let capacity = capacity.max(1) as f64;
    let interval = unit.interval();

    let Some(steps) = interval.steps else {
        let step = (range / (capacity * interval.size_ms)).ceil();
        return if step.is_finite() && step >= 1.0 {
            step.min(f64::from(u32::MAX)) as u32
        } else {
            1
        };
    };

    steps
        .iter()
        .copied()
        .find(|step| (range / (interval.size_ms * f64::from(*step))).ceil() <= capacity)
        .or_else(|| steps.last().copied())
        .unwrap_or(1)
}

/// Next strictly coarser common unit.
#[must_use]
pub fn determine_major_unit(unit: TimeUnit) -> Option<TimeUnit> {
    TimeUnit::ALL
        .iter()
        .copied()
        .skip(unit.index() + 1)
        .find(|candidate| candidate.is_common())
}

/// Generates the ticks of a window `[min, max]`.
///
/// `timestamps` are the sorted data timestamps used when the request's tick
/// source is [`TickSource::Data`]; nominal ticks snap forward to the first
/// timestamp at or after them and are dropped when none exists.
pub fn generate_ticks(request: &TickRequest, timestamps: Option<&[f64]>) -> ChartResult<TickSet> {
    let TickRequest {
        min,
        max,
        capacity,
        refresh,
        time: options,
    } = *request;

    let minor = options
        .unit
        .unwrap_or_else(|| determine_unit_for_auto_ticks(options.min_unit, min, max, capacity));
    let major = determine_major_unit(minor);
    let step = options
        .step_size
        .filter(|step| *step > 0)
        .unwrap_or_else(|| determine_step_size(min, max, minor, capacity));
    let week_start = if minor == TimeUnit::Week {
        options.iso_weekday.and_then(iso_weekday)
    } else {
        None
    };

    let first = match week_start {
        Some(day) => TimeUnit::Day.start_of(start_of_week(min, day)),
        None => minor.start_of(min),
    };

    if minor.diff(max, min) > MAX_UNITS_PER_STEP * f64::from(step) {
        warn!(min, max, step, unit = ?minor, "tick range exceeds generation bound");
        return Err(ChartError::TickRangeTooLarge {
            min,
            max,
            step,
            unit: minor,
        });
    }

    let mut time = first;
    if let Some(major) = major.filter(|_| {
        options.major_enabled && week_start.is_none() && options.round.is_none()
    }) {
        time = major.start_of(time);
        let whole_steps = ((first - time) / (minor.size_ms() * f64::from(step))).trunc();
        time = minor.add(time, whole_steps as i64 * i64::from(step));
    }

    let limit = max + if refresh.is_finite() { refresh.max(0.0) } else { 0.0 };
    let mut nominal = Vec::new();
    while time < limit {
        nominal.push(time);
        if nominal.len() > MAX_NOMINAL_TICKS {
            warn!(
                min,
                max,
                lookahead = limit - max,
                step,
                unit = ?minor,
                "refresh lookahead exceeds tick bound"
            );
            return Err(ChartError::TickRangeTooLarge {
                min,
                max,
                step,
                unit: minor,
            });
        }
        let next = minor.add(time, i64::from(step));
        if !(next > time) {
            break;
        }
        time = next;
    }
    nominal.push(time);

    let snapped: Vec<OrderedFloat<f64>> = match options.source {
        TickSource::Auto => nominal.into_iter().map(OrderedFloat).collect(),
        TickSource::Data => {
            let timestamps = timestamps.unwrap_or(&[]);
            nominal
                .into_iter()
                .filter_map(|tick| snap_to_data(tick, timestamps))
                .map(OrderedFloat)
                .collect()
        }
    };

    let mut values = snapped;
    values.sort_unstable();
    values.dedup();

    let ticks: Vec<Tick> = values
        .into_iter()
        .map(|value| Tick {
            value: value.0,
            major: major.is_some_and(|unit| unit.start_of(value.0) == value.0),
        })
        .collect();

    debug!(
        min,
        max,
        minor = %minor,
        step,
        count = ticks.len(),
        "generated realtime ticks"
    );
    trace!(ticks = ?ticks.iter().map(|tick| tick.value).collect::<Vec<_>>(), "tick values");

    Ok(TickSet {
        ticks,
        minor,
        major,
        step,
    })
}

fn snap_to_data(tick: f64, timestamps: &[f64]) -> Option<f64> {
    let index = timestamps.partition_point(|timestamp| *timestamp < tick);
    timestamps.get(index).copied()
}
